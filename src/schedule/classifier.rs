use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calendar::{days_between, sub_days};
use crate::config::SimulationParams;
use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::penalty::PenaltyEngine;
use crate::types::{Installment, InstallmentStatus};

/// how many leading periods are forced paid, then forced overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSplit {
    pub paid_count: usize,
    pub overdue_count: usize,
}

impl PeriodSplit {
    /// floor each fraction; overdue periods only take what paid ones leave
    pub fn for_term(term_months: usize, params: &SimulationParams) -> Self {
        let n = Decimal::from(term_months as u64);
        let floor_count = |fraction: Decimal| (n * fraction).floor().to_usize().unwrap_or(0);

        let paid_count = floor_count(params.paid_fraction).min(term_months);
        let overdue_count = floor_count(params.overdue_fraction).min(term_months - paid_count);

        Self {
            paid_count,
            overdue_count,
        }
    }
}

/// assigns paid / unpaid / overdue status and penalties to a schedule
pub struct StatusClassifier<R: Rng> {
    params: SimulationParams,
    rng: R,
}

impl StatusClassifier<ChaCha20Rng> {
    /// reproducible classifier driven by a ChaCha stream
    pub fn seeded(params: SimulationParams, seed: u64) -> Result<Self> {
        Self::new(params, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> StatusClassifier<R> {
    pub fn new(params: SimulationParams, rng: R) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, rng })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn classify(
        &mut self,
        schedule: &[Installment],
        as_of: NaiveDate,
    ) -> Result<Vec<Installment>> {
        classify(schedule, as_of, &self.params, &mut self.rng)
    }
}

/// classify a schedule as of a reference date
///
/// Periods are walked in sequence order. The first `paid_count` are paid and
/// the next `overdue_count` overdue whatever their due dates; every later
/// period is overdue when its due date is on or before `as_of`, and unpaid
/// otherwise. The only randomness is drawn from `rng`.
pub fn classify<R: Rng>(
    schedule: &[Installment],
    as_of: NaiveDate,
    params: &SimulationParams,
    rng: &mut R,
) -> Result<Vec<Installment>> {
    params.validate()?;

    let split = PeriodSplit::for_term(schedule.len(), params);
    let penalties = PenaltyEngine::new(params.penalty.clone());
    let mut classified = Vec::with_capacity(schedule.len());

    for (idx, installment) in schedule.iter().enumerate() {
        let mut out = installment.clone();
        out.penalty_amount = Money::ZERO;
        out.paid_on = None;
        out.days_overdue = None;

        let elapsed = days_between(installment.due_date, as_of);

        if idx < split.paid_count {
            let lead = rng.random_range(1..=params.max_paid_lead_days);
            let paid_on = sub_days(installment.due_date, lead)?;
            out.status = InstallmentStatus::Paid;
            out.paid_on = Some(paid_on);
            out.remarks = format!("Paid on {paid_on}, {lead} days before the due date");
        } else if idx < split.paid_count + split.overdue_count {
            let days = if elapsed > 0 {
                clamp_days(elapsed)
            } else {
                rng.random_range(1..=params.max_simulated_overdue_days)
            };
            mark_overdue(&mut out, days, &penalties);
        } else if elapsed >= 0 {
            mark_overdue(&mut out, clamp_days(elapsed), &penalties);
        } else {
            out.status = InstallmentStatus::Unpaid;
            out.remarks = format!("Not yet due, due in {} days", -elapsed);
        }

        classified.push(out);
    }

    debug!(
        installments = classified.len(),
        paid = split.paid_count,
        forced_overdue = split.overdue_count,
        overdue = classified.iter().filter(|i| i.is_overdue()).count(),
        %as_of,
        "classified repayment schedule"
    );

    Ok(classified)
}

fn mark_overdue(installment: &mut Installment, days: u32, penalties: &PenaltyEngine) {
    let penalty = penalties.calculate_penalty(installment.installment_amount, days);
    installment.status = InstallmentStatus::Overdue;
    installment.penalty_amount = penalty.penalty_amount;
    installment.days_overdue = Some(penalty.days_charged);
    installment.remarks = format!(
        "Overdue by {} days, penalty {}",
        penalty.days_charged, penalty.penalty_amount
    );
}

fn clamp_days(days: i64) -> u32 {
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
