pub mod breakdown;
pub mod comparison;
pub mod gross_up;

use crate::config::{BankOffer, FeePolicy, ServiceChargeConfig};
use crate::decimal::{Money, Rate};
use crate::errors::Result;

pub use breakdown::{breakdown_from_schedule, compute_breakdown, FeeBreakdown};
pub use comparison::{compare_with_bank, BankBaseline, BankComparison};
pub use gross_up::GrossUp;

/// bruto/neto conversion and cost of credit under an injected fee policy
#[derive(Debug, Clone, Default)]
pub struct FeeStructureCalculator {
    policy: FeePolicy,
}

impl FeeStructureCalculator {
    pub fn new(policy: FeePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FeePolicy {
        &self.policy
    }

    pub fn gross_from_net(
        &self,
        net_amount: Money,
        origination_fee_rate: Rate,
        nominal_gross: Option<Money>,
    ) -> Result<GrossUp> {
        self.policy.gross_from_net(net_amount, origination_fee_rate, nominal_gross)
    }

    /// gross up the net amount, then price the loan on the gross
    pub fn fee_breakdown(
        &self,
        net_amount: Money,
        borrower_rate: Rate,
        term_months: u32,
        origination_fee_rate: Rate,
        service_charges: &ServiceChargeConfig,
        nominal_gross: Option<Money>,
    ) -> Result<FeeBreakdown> {
        let gross_up = self.gross_from_net(net_amount, origination_fee_rate, nominal_gross)?;
        Ok(compute_breakdown(&gross_up, borrower_rate, term_months, service_charges))
    }

    pub fn compare_with_bank(&self, breakdown: &FeeBreakdown, offer: &BankOffer) -> BankComparison {
        compare_with_bank(breakdown, offer)
    }
}
