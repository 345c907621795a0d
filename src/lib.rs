pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod repayments;
pub mod schedule;
pub mod types;
pub mod view;

// re-export key types
pub use config::SimulationParams;
pub use decimal::{Money, Rate};
pub use errors::{RepaymentError, Result};
pub use loan::{LoanTerms, LoanTermsBuilder};
pub use repayments::{LoanRepayments, RepaymentStatement};
pub use schedule::{
    classify, emi_amount, generate_schedule, next_due, summarize, verify_schedule,
    AmortizationEngine, AmortizationSchedule, PenaltyCalculation, PenaltyConfig, PenaltyEngine,
    PeriodSplit, RepaymentSummary, StatusClassifier,
};
pub use types::{Installment, InstallmentStatus, LoanId};
pub use view::{Page, ScheduleView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
