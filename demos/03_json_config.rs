/// json config - load the fee policy and print a quote as json
use p2p_lending_rs::{EventStore, FeeQuoteRequest, LendingCalculator, LendingConfig, SafeTimeProvider, TimeSource};

const CONFIG: &str = r#"{
    "fee_policy": { "flat_fee_threshold": "10000", "flat_fee_amount": "450" },
    "service_charges": {
        "administrative": { "basis": "percent_of_balance", "rate": "0.01" }
    },
    "bank_offer": { "name": "banco", "annual_rate": "0.30", "monthly_maintenance": "25" }
}"#;

const REQUEST: &str = r#"{
    "net_amount": "50000",
    "borrower_rate_percent": "18",
    "term_months": 12,
    "origination_fee_percent": "5"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LendingConfig::from_json(CONFIG)?;
    let calculator = LendingCalculator::new(config)?;

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut events = EventStore::new();

    let request: FeeQuoteRequest = serde_json::from_str(REQUEST)?;
    let quote = calculator.quote_fees(&request, &time, &mut events)?;

    println!("{}", quote.json()?);
    println!("{}", serde_json::to_string_pretty(events.events())?);

    Ok(())
}
