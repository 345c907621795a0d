pub mod amortization;
pub mod classifier;
pub mod penalty;
pub mod summary;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::loan::LoanTerms;
use crate::types::{Installment, LoanId};

pub use amortization::{emi_amount, generate_schedule, verify_schedule, AmortizationEngine};
pub use classifier::{classify, PeriodSplit, StatusClassifier};
pub use penalty::{PenaltyCalculation, PenaltyConfig, PenaltyEngine};
pub use summary::{next_due, summarize, RepaymentSummary};

/// amortization schedule with loan-level totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub loan_id: LoanId,
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub installment_amount: Money,
    pub installments: Vec<Installment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    pub fn generate(terms: &LoanTerms) -> Result<Self> {
        let installments = generate_schedule(terms)?;

        let total_interest: Money = installments.iter().map(|i| i.interest_portion).sum();
        let total_payment: Money = installments.iter().map(|i| i.installment_amount).sum();
        let installment_amount = installments
            .first()
            .map(|i| i.installment_amount)
            .unwrap_or(Money::ZERO);

        Ok(Self {
            loan_id: terms.loan_id,
            principal: terms.principal,
            annual_rate: terms.annual_rate(),
            term_months: terms.term_months(),
            start_date: terms.start_date,
            installment_amount,
            installments,
            total_interest,
            total_payment,
        })
    }

    /// installment by 1-based sequence number
    pub fn get_installment(&self, sequence_number: u32) -> Option<&Installment> {
        sequence_number
            .checked_sub(1)
            .and_then(|idx| self.installments.get(idx as usize))
    }

    /// remaining balance after an installment, principal before the first
    pub fn balance_after(&self, sequence_number: u32) -> Money {
        self.get_installment(sequence_number)
            .map(|i| i.remaining_balance)
            .unwrap_or(self.principal)
    }
}
