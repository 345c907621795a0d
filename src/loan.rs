use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{RepaymentError, Result};
use crate::types::LoanId;

/// longest term accepted, in years
pub const MAX_TERM_YEARS: u32 = 50;

/// highest annual rate accepted, as a percentage
pub const MAX_ANNUAL_RATE_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// terms of a level-payment loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub loan_id: LoanId,
    pub principal: Money,
    /// e.g. 8.5 for 8.5% per year
    pub annual_interest_rate_percent: Decimal,
    pub term_years: u32,
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// create validated loan terms with a fresh id
    pub fn new(
        principal: Money,
        annual_interest_rate_percent: Decimal,
        term_years: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let terms = Self {
            loan_id: Uuid::new_v4(),
            principal,
            annual_interest_rate_percent,
            term_years,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }

    pub fn annual_rate(&self) -> Rate {
        Rate::from_percent(self.annual_interest_rate_percent)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(RepaymentError::invalid_terms(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }

        if self.annual_interest_rate_percent < Decimal::ZERO {
            return Err(RepaymentError::invalid_terms(format!(
                "interest rate must not be negative, got {}%",
                self.annual_interest_rate_percent
            )));
        }

        if self.annual_interest_rate_percent > MAX_ANNUAL_RATE_PERCENT {
            return Err(RepaymentError::invalid_terms(format!(
                "interest rate {}% exceeds {}%",
                self.annual_interest_rate_percent, MAX_ANNUAL_RATE_PERCENT
            )));
        }

        if self.term_years == 0 {
            return Err(RepaymentError::invalid_terms("term must be at least one year"));
        }

        if self.term_years > MAX_TERM_YEARS {
            return Err(RepaymentError::invalid_terms(format!(
                "term of {} years exceeds {} years",
                self.term_years, MAX_TERM_YEARS
            )));
        }

        Ok(())
    }
}

/// builder for loan terms
#[derive(Debug, Default)]
pub struct LoanTermsBuilder {
    loan_id: Option<LoanId>,
    principal: Option<Money>,
    rate_percent: Option<Decimal>,
    term_years: Option<u32>,
    start_date: Option<NaiveDate>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loan_id(mut self, id: LoanId) -> Self {
        self.loan_id = Some(id);
        self
    }

    pub fn principal(mut self, amount: Money) -> Self {
        self.principal = Some(amount);
        self
    }

    pub fn rate_percent(mut self, rate: Decimal) -> Self {
        self.rate_percent = Some(rate);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let principal = self
            .principal
            .ok_or_else(|| RepaymentError::invalid_terms("principal is required"))?;
        let term_years = self
            .term_years
            .ok_or_else(|| RepaymentError::invalid_terms("term is required"))?;
        let start_date = self
            .start_date
            .ok_or_else(|| RepaymentError::invalid_terms("start date is required"))?;

        let terms = LoanTerms {
            loan_id: self.loan_id.unwrap_or_else(Uuid::new_v4),
            principal,
            annual_interest_rate_percent: self.rate_percent.unwrap_or(Decimal::ZERO),
            term_years,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }
}
