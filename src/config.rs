use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{RepaymentError, Result};
use crate::schedule::PenaltyConfig;

/// parameters for the simulated payment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// share of periods, from the first, marked paid
    pub paid_fraction: Decimal,
    /// share of periods, following the paid ones, forced overdue
    pub overdue_fraction: Decimal,
    /// synthetic payments land 1..=N days before the due date
    pub max_paid_lead_days: u32,
    /// day count drawn for a forced-overdue period not yet past due
    pub max_simulated_overdue_days: u32,
    pub penalty: PenaltyConfig,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            paid_fraction: dec!(0.25),
            overdue_fraction: dec!(0.10),
            max_paid_lead_days: 10,
            max_simulated_overdue_days: 90,
            penalty: PenaltyConfig::default(),
        }
    }
}

impl SimulationParams {
    pub fn new(paid_fraction: Decimal, overdue_fraction: Decimal) -> Self {
        Self {
            paid_fraction,
            overdue_fraction,
            ..Self::default()
        }
    }

    /// no simulated history: status follows due dates only
    pub fn due_date_only() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("paid_fraction", self.paid_fraction),
            ("overdue_fraction", self.overdue_fraction),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RepaymentError::invalid_simulation(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.max_paid_lead_days == 0 {
            return Err(RepaymentError::invalid_simulation(
                "max_paid_lead_days must be at least 1",
            ));
        }

        if self.max_simulated_overdue_days == 0 {
            return Err(RepaymentError::invalid_simulation(
                "max_simulated_overdue_days must be at least 1",
            ));
        }

        if self.penalty.block_days == 0 {
            return Err(RepaymentError::invalid_simulation("penalty block_days must be at least 1"));
        }

        if self.penalty.rate_per_block < Decimal::ZERO {
            return Err(RepaymentError::invalid_simulation(format!(
                "penalty rate must not be negative, got {}",
                self.penalty.rate_per_block
            )));
        }

        Ok(())
    }

    /// parse and validate from json
    pub fn from_json(json: &str) -> Result<Self> {
        let params: SimulationParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
