/// json report - export a repayment statement
use chrono::NaiveDate;
use loan_repayment_rs::{LoanRepayments, LoanTerms, Money, RepaymentStatement, SimulationParams};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let params =
        SimulationParams::from_json(r#"{ "paid_fraction": "0.5", "overdue_fraction": "0.25" }"#)?;
    println!("=== simulation params ===\n{}\n", params.to_json_pretty()?);

    let terms = LoanTerms::builder()
        .principal(Money::from_major(12_000))
        .rate_percent(dec!(0))
        .term_years(1)
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?)
        .build()?;

    let repayments = LoanRepayments::new(terms, params, 2024)?;
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).ok_or("bad date")?;
    let statement = repayments.statement_as_of(as_of)?;

    let json = statement.to_json_pretty()?;
    println!("=== statement ===\n{json}");

    let restored = RepaymentStatement::from_json(&json)?;
    assert_eq!(restored, statement);
    println!("\nround trip ok");

    Ok(())
}
