/// quick start - generate an EMI schedule
use chrono::NaiveDate;
use loan_repayment_rs::{AmortizationSchedule, LoanTerms, Money};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let terms = LoanTerms::new(
        Money::from_major(100_000),
        dec!(8.5),
        5,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    )?;

    let schedule = AmortizationSchedule::generate(&terms)?;

    println!("=== 5 year loan at 8.5% ===\n");
    println!("monthly installment: ${}", schedule.installment_amount);
    println!("total interest:      ${}", schedule.total_interest);
    println!("total repaid:        ${}\n", schedule.total_payment);

    println!(
        "{:>3}  {:<10}  {:>10}  {:>10}  {:>12}",
        "#", "due", "interest", "principal", "balance"
    );
    for inst in schedule.installments.iter().take(6) {
        println!(
            "{:>3}  {:<10}  {:>10}  {:>10}  {:>12}",
            inst.sequence_number,
            inst.due_date,
            inst.interest_portion,
            inst.principal_portion,
            inst.remaining_balance
        );
    }
    println!("...");
    if let Some(last) = schedule.installments.last() {
        println!(
            "{:>3}  {:<10}  {:>10}  {:>10}  {:>12}",
            last.sequence_number,
            last.due_date,
            last.interest_portion,
            last.principal_portion,
            last.remaining_balance
        );
    }

    Ok(())
}
