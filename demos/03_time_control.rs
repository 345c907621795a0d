/// time control - statements follow an injected clock
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_repayment_rs::{
    LoanRepayments, LoanTerms, Money, SafeTimeProvider, SimulationParams, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().ok_or("bad time")?,
    ));
    let controller = time.test_control().expect("test clock");

    let terms = LoanTerms::new(
        Money::from_major(20_000),
        dec!(11.5),
        2,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    )?;
    let repayments = LoanRepayments::new(terms, SimulationParams::due_date_only(), 0)?;

    println!("=== nothing paid, clock advancing ===\n");
    for _ in 0..6 {
        let statement = repayments.statement_now(&time)?;
        println!(
            "{}  overdue {:>2}  penalty ${:>8}  outstanding ${}",
            statement.as_of,
            statement.summary.overdue_count,
            statement.summary.total_penalty,
            statement.summary.total_outstanding()
        );
        controller.advance(Duration::days(45));
    }

    Ok(())
}
