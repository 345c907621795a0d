/// status simulation - paid / overdue / unpaid split with penalties
use chrono::NaiveDate;
use loan_repayment_rs::{
    generate_schedule, summarize, InstallmentStatus, LoanTerms, Money, ScheduleView,
    SimulationParams, StatusClassifier,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).ok_or("bad date")?;
    let terms = LoanTerms::new(Money::from_major(250_000), dec!(9), 10, start)?;

    let schedule = generate_schedule(&terms)?;
    let params = SimulationParams::new(dec!(0.25), dec!(0.10));
    let mut classifier = StatusClassifier::seeded(params, 7)?;
    let classified = classifier.classify(&schedule, as_of)?;
    let summary = summarize(&classified);

    println!("=== status as of {as_of} ===\n");
    println!("paid:    {:>3}  ${}", summary.paid_count, summary.total_paid);
    println!(
        "overdue: {:>3}  ${} (+ ${} penalty)",
        summary.overdue_count, summary.total_overdue, summary.total_penalty
    );
    println!("unpaid:  {:>3}  ${}", summary.unpaid_count, summary.total_pending);
    println!("outstanding: ${}\n", summary.total_outstanding());

    println!("overdue installments:");
    let view = ScheduleView::new(&classified).with_status(Some(InstallmentStatus::Overdue));
    for page_number in 1..=view.total_pages() {
        for inst in view.page(page_number).items {
            println!("  #{:<3} {}  {}", inst.sequence_number, inst.due_date, inst.remarks);
        }
    }

    Ok(())
}
