use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// late charge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// fraction of the installment charged per started block
    pub rate_per_block: Decimal,
    /// length of a charging block in days
    pub block_days: u32,
    /// floor applied to the day count once an installment is overdue
    pub minimum_days_overdue: u32,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            rate_per_block: dec!(0.02),
            block_days: 30,
            minimum_days_overdue: 1,
        }
    }
}

/// engine for late-payment penalties on overdue installments
#[derive(Debug, Clone, Default)]
pub struct PenaltyEngine {
    pub config: PenaltyConfig,
}

impl PenaltyEngine {
    pub fn new(config: PenaltyConfig) -> Self {
        Self { config }
    }

    /// penalty = amount * rate_per_block * ceil(days / block_days)
    pub fn calculate_penalty(
        &self,
        installment_amount: Money,
        days_overdue: u32,
    ) -> PenaltyCalculation {
        let days_charged = days_overdue.max(self.config.minimum_days_overdue);
        let block_days = self.config.block_days.max(1);
        let blocks_charged = days_charged.div_ceil(block_days);

        let penalty = installment_amount.as_decimal()
            * self.config.rate_per_block
            * Decimal::from(blocks_charged);

        PenaltyCalculation {
            penalty_amount: Money::from_decimal_currency(penalty),
            days_charged,
            blocks_charged,
            overdue_base: installment_amount,
        }
    }
}

/// penalty calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyCalculation {
    pub penalty_amount: Money,
    pub days_charged: u32,
    pub blocks_charged: u32,
    pub overdue_base: Money,
}
