pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod fees;
pub mod payments;
pub mod types;

// re-export key types
pub use calculator::{
    apply_extra_payment_reduce_term, build_amortization_schedule, compute_annuity_payment,
    compute_fee_breakdown, FeeQuoteRequest, LendingCalculator, LoanQuote,
};
pub use config::{BankOffer, FeePolicy, LendingConfig, ServiceChargeConfig};
pub use decimal::{Money, Rate};
pub use errors::{LendingError, Result};
pub use events::{Event, EventStore};
pub use fees::{BankBaseline, BankComparison, FeeBreakdown, FeeStructureCalculator, GrossUp};
pub use payments::{AmortizationRow, AmortizationSchedule, ExtraPaymentResult};
pub use types::{ChargeBasis, ChargeKind, FeeTier, LoanTerms, QuoteId, MAX_TERM_MONTHS};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
