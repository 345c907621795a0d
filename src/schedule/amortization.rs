use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calendar::add_months;
use crate::decimal::{Money, Rate};
use crate::errors::{RepaymentError, Result};
use crate::loan::LoanTerms;
use crate::types::{Installment, InstallmentStatus};

/// largest full-precision balance left over after the final period
const RESIDUAL_TOLERANCE: Decimal = dec!(0.000001);

/// equal-installment (EMI) schedule generator
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationEngine;

impl AmortizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// expand loan terms into a dated, per-period breakdown
    ///
    /// Interest comes from a full-precision walk and is rounded once to cents.
    /// The emitted balance is a cent-level chain: each row's principal is the
    /// scheduled amount less its interest, and the final row takes whatever
    /// balance is left, so its installment may differ from the others by the
    /// accumulated rounding drift.
    pub fn generate_schedule(&self, terms: &LoanTerms) -> Result<Vec<Installment>> {
        if let Err(e) = terms.validate() {
            warn!(loan_id = %terms.loan_id, error = %e, "rejected loan terms");
            return Err(e);
        }

        let term_months = terms.term_months();
        let monthly_rate = terms.annual_rate().monthly_rate().as_decimal();
        let payment = level_payment(terms.principal.as_decimal(), monthly_rate, term_months)?;
        let installment_amount = Money::from_decimal_currency(payment);

        let mut installments = Vec::with_capacity(term_months as usize);
        let mut balance = terms.principal.as_decimal();
        let mut carried = terms.principal.round_currency();
        let mut residual = Decimal::ZERO;

        for i in 1..=term_months {
            let due_date = add_months(terms.start_date, i)?;
            let interest = balance * monthly_rate;
            let principal_part = payment - interest;
            let is_last = i == term_months;

            if is_last {
                residual = balance - principal_part;
                balance = Decimal::ZERO;
            } else {
                balance = (balance - principal_part).max(Decimal::ZERO);
            }

            let interest_portion = Money::from_decimal_currency(interest);
            let principal_portion = if is_last {
                carried
            } else {
                (installment_amount - interest_portion).min(carried)
            };
            carried -= principal_portion;

            installments.push(Installment {
                sequence_number: i,
                due_date,
                installment_amount: interest_portion + principal_portion,
                interest_portion,
                principal_portion,
                remaining_balance: carried,
                penalty_amount: Money::ZERO,
                status: InstallmentStatus::Unpaid,
                remarks: "Payment scheduled".to_string(),
                paid_on: None,
                days_overdue: None,
            });
        }

        if cfg!(debug_assertions) {
            if residual.abs() > RESIDUAL_TOLERANCE {
                return Err(RepaymentError::RoundingInvariantViolation {
                    message: format!("final balance residual {residual} before forcing zero"),
                });
            }
            verify_schedule(terms, &installments)?;
        }

        debug!(
            loan_id = %terms.loan_id,
            term_months,
            installment_amount = %installment_amount,
            "generated repayment schedule"
        );

        Ok(installments)
    }
}

/// generate the EMI schedule for a loan
pub fn generate_schedule(terms: &LoanTerms) -> Result<Vec<Installment>> {
    AmortizationEngine::new().generate_schedule(terms)
}

/// level payment rounded to cents
pub fn emi_amount(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    let payment = level_payment(
        principal.as_decimal(),
        annual_rate.monthly_rate().as_decimal(),
        months,
    )?;
    Ok(Money::from_decimal_currency(payment))
}

/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), full precision
fn level_payment(principal: Decimal, monthly_rate: Decimal, months: u32) -> Result<Decimal> {
    if months == 0 {
        return Err(RepaymentError::invalid_terms("term must cover at least one period"));
    }

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let base = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        compound = compound.checked_mul(base).ok_or_else(|| {
            RepaymentError::invalid_terms(format!(
                "compound factor overflows for {months} periods at monthly rate {monthly_rate}"
            ))
        })?;
    }

    let denominator = compound - Decimal::ONE;

    // rate too small to move the compound factor at decimal precision
    if denominator.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let factor = monthly_rate * compound / denominator;
    principal.checked_mul(factor).ok_or_else(|| {
        RepaymentError::invalid_terms(format!("payment for principal {principal} overflows"))
    })
}

/// check the rounding invariants of a generated schedule
///
/// Every row must reconcile against the cent balance carried from the row
/// before it, all rows but the last share one installment amount, and the
/// principal portions must add up to the principal exactly.
pub fn verify_schedule(terms: &LoanTerms, installments: &[Installment]) -> Result<()> {
    let violation = |message: String| -> Result<()> {
        Err(RepaymentError::RoundingInvariantViolation { message })
    };

    let term_months = terms.term_months();
    if installments.len() != term_months as usize {
        return violation(format!(
            "expected {term_months} installments, found {}",
            installments.len()
        ));
    }

    for pair in installments.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.sequence_number != prev.sequence_number + 1 || next.due_date <= prev.due_date {
            return violation(format!("installment {} out of order", next.sequence_number));
        }
    }

    let regular = &installments[..installments.len().saturating_sub(1)];
    if let Some(first) = regular.first() {
        let changed = regular
            .iter()
            .find(|i| i.installment_amount != first.installment_amount);
        if let Some(other) = changed {
            return violation(format!(
                "installment amount changes at installment {}",
                other.sequence_number
            ));
        }
    }

    let mut carried = terms.principal.round_currency();
    for inst in installments {
        if inst.interest_portion + inst.principal_portion != inst.installment_amount {
            return violation(format!(
                "interest and principal do not sum to the installment at {}",
                inst.sequence_number
            ));
        }
        if inst.principal_portion.is_negative() || inst.principal_portion > carried {
            return violation(format!(
                "principal {} at installment {} exceeds balance {carried}",
                inst.principal_portion, inst.sequence_number
            ));
        }
        carried -= inst.principal_portion;
        if inst.remaining_balance != carried {
            return violation(format!(
                "balance {} at installment {} does not reconcile to {carried}",
                inst.remaining_balance, inst.sequence_number
            ));
        }
    }

    if let Some(last) = installments.last() {
        if !last.remaining_balance.is_zero() {
            return violation(format!("final balance is {}", last.remaining_balance));
        }
    }

    let repaid: Money = installments.iter().map(|i| i.principal_portion).sum();
    if repaid != terms.principal.round_currency() {
        return violation(format!(
            "principal repaid {repaid} differs from {}",
            terms.principal
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn terms(principal: i64, rate: Decimal, years: u32) -> LoanTerms {
        LoanTerms::new(Money::from_major(principal), rate, years, start()).unwrap()
    }

    #[test]
    fn test_five_year_schedule() {
        let schedule = generate_schedule(&terms(100_000, dec!(8.5), 5)).unwrap();

        assert_eq!(schedule.len(), 60);

        let first = &schedule[0];
        assert_eq!(first.sequence_number, 1);
        assert_eq!(first.due_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(first.interest_portion, Money::from_decimal(dec!(708.33)));
        assert_eq!(
            first.principal_portion,
            first.installment_amount - Money::from_decimal(dec!(708.33))
        );

        let payment = first.installment_amount.as_decimal();
        assert!(payment > dec!(2051.60) && payment < dec!(2051.70), "payment {payment}");

        let last = schedule.last().unwrap();
        assert_eq!(last.due_date, NaiveDate::from_ymd_opt(2029, 1, 1).unwrap());
        assert_eq!(last.remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = generate_schedule(&terms(12_000, Decimal::ZERO, 1)).unwrap();

        assert_eq!(schedule.len(), 12);
        for (i, inst) in schedule.iter().enumerate() {
            assert_eq!(inst.installment_amount, Money::from_major(1_000));
            assert_eq!(inst.principal_portion, Money::from_major(1_000));
            assert!(inst.interest_portion.is_zero());
            assert_eq!(inst.remaining_balance, Money::from_major(12_000 - 1_000 * (i as i64 + 1)));
        }
    }

    #[test]
    fn test_zero_rate_last_period_absorbs_remainder() {
        let schedule = generate_schedule(&terms(10_000, Decimal::ZERO, 1)).unwrap();
        let expected = Money::from_decimal(dec!(833.33));

        assert!(schedule[..11].iter().all(|i| i.installment_amount == expected));
        assert!(schedule.iter().all(|i| i.interest_portion.is_zero()));

        let last = schedule.last().unwrap();
        assert_eq!(schedule[10].remaining_balance, Money::from_decimal(dec!(833.37)));
        assert_eq!(last.principal_portion, Money::from_decimal(dec!(833.37)));
        assert_eq!(last.installment_amount, Money::from_decimal(dec!(833.37)));
        assert_eq!(last.remaining_balance, Money::ZERO);

        let repaid: Money = schedule.iter().map(|i| i.principal_portion).sum();
        assert_eq!(repaid, Money::from_major(10_000));
    }

    #[test]
    fn test_thirty_year_schedule_closes_to_zero() {
        let t = terms(450_000, dec!(6.75), 30);
        let schedule = generate_schedule(&t).unwrap();

        assert_eq!(schedule.len(), 360);
        assert!(verify_schedule(&t, &schedule).is_ok());

        let repaid: Money = schedule.iter().map(|i| i.principal_portion).sum();
        assert_eq!(repaid, t.principal);

        let last = &schedule[359];
        assert_eq!(last.principal_portion, schedule[358].remaining_balance);
        assert_eq!(last.installment_amount, last.interest_portion + last.principal_portion);
        assert_eq!(last.remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_balance_chain_reconciles() {
        let t = terms(450_000, dec!(6.75), 30);
        let schedule = generate_schedule(&t).unwrap();

        let mut previous = t.principal;
        for inst in &schedule {
            assert_eq!(previous - inst.principal_portion, inst.remaining_balance);
            assert_eq!(inst.interest_portion + inst.principal_portion, inst.installment_amount);
            previous = inst.remaining_balance;
        }

        let regular = schedule[0].installment_amount;
        assert!(schedule[..359].iter().all(|i| i.installment_amount == regular));
    }

    #[test]
    fn test_month_end_start_date() {
        let t = LoanTerms::new(
            Money::from_major(5_000),
            dec!(10),
            1,
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        let schedule = generate_schedule(&t).unwrap();

        assert_eq!(schedule[0].due_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(schedule[1].due_date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut t = terms(1_000, dec!(5), 1);
        t.principal = Money::ZERO;
        assert!(matches!(
            generate_schedule(&t),
            Err(RepaymentError::InvalidLoanTerms { .. })
        ));

        let mut t = terms(1_000, dec!(5), 1);
        t.term_years = 0;
        assert!(generate_schedule(&t).is_err());
    }

    #[test]
    fn test_emi_amount() {
        let emi = emi_amount(Money::from_major(12_000), Rate::ZERO, 12).unwrap();
        assert_eq!(emi, Money::from_major(1_000));

        let emi = emi_amount(Money::from_major(100_000), Rate::from_percent(dec!(12)), 12).unwrap();
        assert_eq!(emi, Money::from_decimal(dec!(8884.88)));

        assert!(emi_amount(Money::from_major(1), Rate::ZERO, 0).is_err());
    }

    #[test]
    fn test_verify_detects_tampering() {
        let t = terms(20_000, dec!(7), 2);
        let mut schedule = generate_schedule(&t).unwrap();
        schedule[23].remaining_balance = Money::CENT;

        assert!(matches!(
            verify_schedule(&t, &schedule),
            Err(RepaymentError::RoundingInvariantViolation { .. })
        ));

        let mut drifted = generate_schedule(&t).unwrap();
        drifted[5].principal_portion += Money::CENT;
        drifted[5].interest_portion -= Money::CENT;
        assert!(verify_schedule(&t, &drifted).is_err());

        schedule.pop();
        assert!(verify_schedule(&t, &schedule).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_schedule_invariants(
            principal in 10_000i64..5_000_000,
            rate_bps in 0u32..3_000,
            years in 1u32..=30,
        ) {
            let rate = Decimal::new(i64::from(rate_bps), 2);
            let t = terms(principal, rate, years);
            let schedule = generate_schedule(&t).unwrap();

            prop_assert_eq!(schedule.len() as u32, years * 12);

            for pair in schedule.windows(2) {
                prop_assert!(pair[0].remaining_balance >= pair[1].remaining_balance);
                prop_assert!(pair[0].due_date < pair[1].due_date);
            }

            prop_assert_eq!(schedule.last().unwrap().remaining_balance, Money::ZERO);

            let repaid: Money = schedule.iter().map(|i| i.principal_portion).sum();
            prop_assert_eq!(repaid, t.principal);

            let mut previous = t.principal;
            for inst in &schedule {
                prop_assert_eq!(previous - inst.principal_portion, inst.remaining_balance);
                previous = inst.remaining_balance;
            }

            if rate_bps == 0 {
                let expected = (t.principal / Decimal::from(years * 12)).round_currency();
                for inst in &schedule[..schedule.len() - 1] {
                    prop_assert!(inst.interest_portion.is_zero());
                    prop_assert_eq!(inst.installment_amount, expected);
                }
                prop_assert!(schedule.last().unwrap().interest_portion.is_zero());
            }
        }
    }
}
