use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::FeePolicy;
use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};
use crate::types::FeeTier;

/// bruto amount that leaves the requested neto after the origination fee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrossUp {
    pub net_amount: Money,
    pub gross_amount: Money,
    pub origination_fee: Money,
    pub origination_fee_rate: Rate,
    pub tier: FeeTier,
}

impl FeePolicy {
    /// convert a net disbursement into the gross loan amount
    ///
    /// Net amounts up to the flat threshold pay the flat fee. Above it, a fee
    /// rate strictly between 0% and 100% grosses the amount up; any other rate
    /// falls back to the caller's nominal gross figure.
    pub fn gross_from_net(
        &self,
        net_amount: Money,
        origination_fee_rate: Rate,
        nominal_gross: Option<Money>,
    ) -> Result<GrossUp> {
        if net_amount.is_negative() {
            return Err(LendingError::invalid_input("net_amount", format!("{} is negative", net_amount)));
        }

        let (gross_amount, tier) = if net_amount <= self.flat_fee_threshold {
            (net_amount + self.flat_fee_amount, FeeTier::Flat)
        } else if origination_fee_rate > Rate::ZERO && origination_fee_rate < Rate::ONE {
            let retained = Decimal::ONE - origination_fee_rate.as_decimal();
            ((net_amount / retained).round_currency(), FeeTier::Percentage)
        } else {
            let nominal = nominal_gross.ok_or_else(|| LendingError::InvalidConfiguration {
                message: format!(
                    "origination fee {} cannot gross up {}, a nominal gross amount is required",
                    origination_fee_rate, net_amount
                ),
            })?;
            if nominal < net_amount {
                return Err(LendingError::invalid_input(
                    "nominal_gross",
                    format!("{} is below net amount {}", nominal, net_amount),
                ));
            }
            (nominal, FeeTier::Nominal)
        };

        Ok(GrossUp {
            net_amount,
            gross_amount,
            origination_fee: gross_amount - net_amount,
            origination_fee_rate,
            tier,
        })
    }
}
