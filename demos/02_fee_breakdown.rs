/// fee breakdown - bruto/neto conversion and bank comparison
use p2p_lending_rs::{
    BankOffer, ChargeBasis, ChargeKind, EventStore, FeeQuoteRequest, LendingCalculator, LendingConfig, Money,
    Rate, SafeTimeProvider, TimeSource,
};
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== fee breakdown example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let mut events = EventStore::new();

    let config = LendingConfig::standard()
        .with_service_charge(
            ChargeKind::Administrative,
            ChargeBasis::PercentOfBalance { rate: Rate::from_percent(dec!(0.5)) },
        )
        .with_service_charge(ChargeKind::Insurance, ChargeBasis::Flat { amount: Money::from_major(15) })
        .with_bank_offer(BankOffer::new("traditional bank", Rate::from_percent(dec!(30)), Money::from_major(25)));
    let calculator = LendingCalculator::new(config)?;

    for net in [8_000, 50_000] {
        let request = FeeQuoteRequest {
            net_amount: Money::from_major(net),
            borrower_rate_percent: dec!(18),
            term_months: 12,
            origination_fee_percent: dec!(5),
            nominal_gross: None,
        };
        let quote = calculator.quote_fees(&request, &time, &mut events)?;

        if let Some(fees) = &quote.fees {
            println!("net {} -> gross {} (fee {})", fees.net_amount, fees.gross_amount, fees.origination_fee);
            println!("  installment {} + service {} = {}", fees.annuity_payment, fees.avg_service_fee, fees.monthly_payment_total);
            println!("  cost of credit {}, total payable {}", fees.total_cost_of_credit, fees.total_payable);
        }
        if let Some(comparison) = &quote.bank_comparison {
            println!(
                "  {} would charge {} in total (difference {})",
                comparison.bank.bank_name, comparison.bank.total_payable, comparison.total_payable_difference
            );
        }
        println!();
    }

    Ok(())
}
