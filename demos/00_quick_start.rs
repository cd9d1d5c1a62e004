/// quick start - minimal example to get started
use p2p_lending_rs::{build_amortization_schedule, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 10,000 over 24 months at 24% nominal
    let schedule = build_amortization_schedule(Money::from_major(10_000), Rate::from_percent(dec!(24)), 24);

    println!("installment: {}", schedule.payment);
    println!("total interest: {}", schedule.total_interest);

    for row in &schedule.rows {
        println!(
            "{:>3} {:>10} {:>10} {:>10} {:>10}",
            row.installment, row.payment_amount, row.principal_portion, row.interest_portion, row.ending_balance
        );
    }

    Ok(())
}
