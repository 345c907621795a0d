use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{Installment, InstallmentStatus};

/// totals by status over a classified schedule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RepaymentSummary {
    pub total_installments: usize,
    pub paid_count: usize,
    pub unpaid_count: usize,
    pub overdue_count: usize,
    pub total_paid: Money,
    pub total_pending: Money,
    pub total_overdue: Money,
    pub total_penalty: Money,
}

impl RepaymentSummary {
    /// everything still owed, penalties included
    pub fn total_outstanding(&self) -> Money {
        (self.total_pending + self.total_overdue + self.total_penalty).round_currency()
    }
}

/// reduce a schedule to counts and amounts per status
///
/// Sums run in full precision and are rounded once at the end.
pub fn summarize(schedule: &[Installment]) -> RepaymentSummary {
    let mut summary = RepaymentSummary {
        total_installments: schedule.len(),
        ..RepaymentSummary::default()
    };
    let mut paid = Decimal::ZERO;
    let mut pending = Decimal::ZERO;
    let mut overdue = Decimal::ZERO;
    let mut penalty = Decimal::ZERO;

    for installment in schedule {
        let amount = installment.installment_amount.as_decimal();
        match installment.status {
            InstallmentStatus::Paid => {
                summary.paid_count += 1;
                paid += amount;
            }
            InstallmentStatus::Unpaid => {
                summary.unpaid_count += 1;
                pending += amount;
            }
            InstallmentStatus::Overdue => {
                summary.overdue_count += 1;
                overdue += amount;
                penalty += installment.penalty_amount.as_decimal();
            }
        }
    }

    summary.total_paid = Money::from_decimal_currency(paid);
    summary.total_pending = Money::from_decimal_currency(pending);
    summary.total_overdue = Money::from_decimal_currency(overdue);
    summary.total_penalty = Money::from_decimal_currency(penalty);
    summary
}

/// earliest installment still awaiting payment
pub fn next_due(schedule: &[Installment]) -> Option<&Installment> {
    schedule.iter().find(|i| !i.is_paid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn installment(
        seq: u32,
        amount: Decimal,
        status: InstallmentStatus,
        penalty: Decimal,
    ) -> Installment {
        Installment {
            sequence_number: seq,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Months::new(seq),
            installment_amount: Money::from_decimal(amount),
            interest_portion: Money::ZERO,
            principal_portion: Money::from_decimal(amount),
            remaining_balance: Money::ZERO,
            penalty_amount: Money::from_decimal(penalty),
            status,
            remarks: String::new(),
            paid_on: None,
            days_overdue: None,
        }
    }

    #[test]
    fn test_summary_totals() {
        let schedule = vec![
            installment(1, dec!(1000), InstallmentStatus::Paid, dec!(0)),
            installment(2, dec!(1000), InstallmentStatus::Paid, dec!(0)),
            installment(3, dec!(1000), InstallmentStatus::Overdue, dec!(40)),
            installment(4, dec!(1000), InstallmentStatus::Overdue, dec!(20)),
            installment(5, dec!(1000), InstallmentStatus::Unpaid, dec!(0)),
        ];

        let summary = summarize(&schedule);

        assert_eq!(summary.total_installments, 5);
        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.overdue_count, 2);
        assert_eq!(summary.unpaid_count, 1);
        assert_eq!(summary.total_paid, Money::from_major(2_000));
        assert_eq!(summary.total_overdue, Money::from_major(2_000));
        assert_eq!(summary.total_pending, Money::from_major(1_000));
        assert_eq!(summary.total_penalty, Money::from_major(60));
        assert_eq!(summary.total_outstanding(), Money::from_major(3_060));
    }

    #[test]
    fn test_empty_schedule() {
        let summary = summarize(&[]);
        assert_eq!(summary, RepaymentSummary::default());
        assert!(next_due(&[]).is_none());
    }

    #[test]
    fn test_next_due_skips_paid() {
        let schedule = vec![
            installment(1, dec!(500), InstallmentStatus::Paid, dec!(0)),
            installment(2, dec!(500), InstallmentStatus::Overdue, dec!(10)),
            installment(3, dec!(500), InstallmentStatus::Unpaid, dec!(0)),
        ];

        assert_eq!(next_due(&schedule).unwrap().sequence_number, 2);
    }

    #[test]
    fn test_counts_partition_schedule() {
        let schedule: Vec<_> = (1..=9)
            .map(|seq| {
                let status = match seq % 3 {
                    0 => InstallmentStatus::Paid,
                    1 => InstallmentStatus::Unpaid,
                    _ => InstallmentStatus::Overdue,
                };
                installment(seq, dec!(333.33), status, dec!(0))
            })
            .collect();

        let summary = summarize(&schedule);
        assert_eq!(
            summary.paid_count + summary.unpaid_count + summary.overdue_count,
            summary.total_installments
        );
        assert_eq!(summary.total_paid, Money::from_decimal(dec!(999.99)));
    }
}
