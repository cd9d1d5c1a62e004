pub mod amortization;
pub mod overpayment;

pub use amortization::{build_schedule, compute_payment, AmortizationRow, AmortizationSchedule};
pub use overpayment::{apply_extra_payment_reduce_term, calculate_term_for_payment, ExtraPaymentResult};
