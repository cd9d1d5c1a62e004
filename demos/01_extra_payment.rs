/// extra payment - keep the installment, finish earlier
use p2p_lending_rs::{EventStore, LendingCalculator, LendingConfig, Money, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== extra payment example ===\n");

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut events = EventStore::new();
    let calculator = LendingCalculator::new(LendingConfig::standard())?;

    for extra in [500, 2_500, 5_000, 10_000] {
        let result = calculator.quote_extra_payment(
            Money::from_major(10_000),
            dec!(24),
            24,
            Money::from_major(extra),
            &time,
            &mut events,
        )?;

        println!(
            "extra {:>6}: {} months instead of {}, installment {}, interest saved {}",
            extra,
            result.new_months,
            result.original.term_months,
            result.new_payment,
            result.interest_saved
        );
    }

    // a loan with no installments cannot absorb a partial extra payment
    if let Err(e) = calculator.quote_extra_payment(
        Money::from_major(10_000),
        dec!(24),
        0,
        Money::from_major(500),
        &time,
        &mut events,
    ) {
        println!("\nrejected: {}", e);
    }

    println!("\nrecorded {} events", events.len());
    Ok(())
}
