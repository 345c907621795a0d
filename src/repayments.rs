use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimulationParams;
use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::LoanTerms;
use crate::schedule::{summarize, AmortizationSchedule, RepaymentSummary, StatusClassifier};
use crate::types::{Installment, LoanId};

/// classified schedule and totals for one loan at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentStatement {
    pub loan_id: LoanId,
    pub as_of: NaiveDate,
    pub installment_amount: Money,
    pub total_interest: Money,
    pub installments: Vec<Installment>,
    pub summary: RepaymentSummary,
}

impl RepaymentStatement {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// repayment tracking for a single loan
///
/// The simulated history is keyed by `seed`, so two statements for the same
/// date are identical.
#[derive(Debug, Clone)]
pub struct LoanRepayments {
    terms: LoanTerms,
    params: SimulationParams,
    seed: u64,
}

impl LoanRepayments {
    pub fn new(terms: LoanTerms, params: SimulationParams, seed: u64) -> Result<Self> {
        terms.validate()?;
        params.validate()?;
        Ok(Self { terms, params, seed })
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn schedule(&self) -> Result<AmortizationSchedule> {
        AmortizationSchedule::generate(&self.terms)
    }

    /// statement with statuses resolved against `as_of`
    pub fn statement_as_of(&self, as_of: NaiveDate) -> Result<RepaymentStatement> {
        let schedule = self.schedule()?;
        let mut classifier = StatusClassifier::seeded(self.params.clone(), self.seed)?;
        let installments = classifier.classify(&schedule.installments, as_of)?;
        let summary = summarize(&installments);

        debug!(
            loan_id = %self.terms.loan_id,
            %as_of,
            outstanding = %summary.total_outstanding(),
            "built repayment statement"
        );

        Ok(RepaymentStatement {
            loan_id: self.terms.loan_id,
            as_of,
            installment_amount: schedule.installment_amount,
            total_interest: schedule.total_interest,
            installments,
            summary,
        })
    }

    /// statement as of the provider's current date
    pub fn statement_now(&self, time: &SafeTimeProvider) -> Result<RepaymentStatement> {
        self.statement_as_of(time.now().date_naive())
    }
}
