use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// installment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// settled before the due date
    Paid,
    /// not yet due
    Unpaid,
    /// due date passed without payment, penalty accrues
    Overdue,
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstallmentStatus::Paid => "Paid",
            InstallmentStatus::Unpaid => "Unpaid",
            InstallmentStatus::Overdue => "Overdue",
        };
        f.write_str(label)
    }
}

/// one period of a repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub installment_amount: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
    pub penalty_amount: Money,
    pub status: InstallmentStatus,
    pub remarks: String,
    /// synthetic settlement date, set only when paid
    pub paid_on: Option<NaiveDate>,
    /// set only when overdue
    pub days_overdue: Option<u32>,
}

impl Installment {
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    pub fn is_overdue(&self) -> bool {
        self.status == InstallmentStatus::Overdue
    }
}
