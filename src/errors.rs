use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepaymentError {
    #[error("invalid loan terms: {message}")]
    InvalidLoanTerms {
        message: String,
    },

    #[error("invalid simulation parameters: {message}")]
    InvalidSimulation {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    /// schedule failed its own reconciliation checks
    #[error("rounding invariant violated: {message}")]
    RoundingInvariantViolation {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepaymentError {
    pub(crate) fn invalid_terms(message: impl Into<String>) -> Self {
        RepaymentError::InvalidLoanTerms {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_simulation(message: impl Into<String>) -> Self {
        RepaymentError::InvalidSimulation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepaymentError>;
