use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};
use crate::types::{ChargeBasis, ChargeKind};

/// lending configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingConfig {
    #[serde(default)]
    pub fee_policy: FeePolicy,
    #[serde(default)]
    pub service_charges: ServiceChargeConfig,
    #[serde(default)]
    pub bank_offer: Option<BankOffer>,
}

/// origination fee tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// net amounts at or below this pay the flat fee
    pub flat_fee_threshold: Money,
    pub flat_fee_amount: Money,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            flat_fee_threshold: Money::from_major(10_000),
            flat_fee_amount: Money::from_major(450),
        }
    }
}

impl FeePolicy {
    pub fn new(flat_fee_threshold: Money, flat_fee_amount: Money) -> Result<Self> {
        let policy = Self {
            flat_fee_threshold,
            flat_fee_amount,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.flat_fee_threshold.is_negative() || self.flat_fee_amount.is_negative() {
            return Err(LendingError::InvalidConfiguration {
                message: format!(
                    "flat fee tier must be non-negative: threshold {}, amount {}",
                    self.flat_fee_threshold, self.flat_fee_amount
                ),
            });
        }
        Ok(())
    }
}

/// recurring per-installment charges keyed by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceChargeConfig {
    charges: BTreeMap<ChargeKind, ChargeBasis>,
}

impl ServiceChargeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// add or replace the charge for a kind
    pub fn with_charge(mut self, kind: ChargeKind, basis: ChargeBasis) -> Self {
        self.charges.insert(kind, basis);
        self
    }

    pub fn get(&self, kind: ChargeKind) -> Option<&ChargeBasis> {
        self.charges.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChargeKind, &ChargeBasis)> {
        self.charges.iter()
    }

    /// total charge for one installment
    pub fn installment_charge(&self, gross_amount: Money, opening_balance: Money) -> Money {
        self.charges
            .values()
            .map(|basis| basis.charge(gross_amount, opening_balance))
            .sum()
    }

    pub fn validate(&self) -> Result<()> {
        for (kind, basis) in &self.charges {
            let negative = match basis {
                ChargeBasis::Flat { amount } => amount.is_negative(),
                ChargeBasis::PercentOfGross { rate } | ChargeBasis::PercentOfBalance { rate } => {
                    rate.as_decimal() < Decimal::ZERO
                }
            };
            if negative {
                return Err(LendingError::InvalidConfiguration {
                    message: format!("service charge {:?} must be non-negative", kind),
                });
            }
        }
        Ok(())
    }
}

/// traditional bank offer used as comparison baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankOffer {
    pub name: String,
    pub annual_rate: Rate,
    /// fixed monthly account maintenance
    pub monthly_maintenance: Money,
}

impl BankOffer {
    pub fn new(name: impl Into<String>, annual_rate: Rate, monthly_maintenance: Money) -> Self {
        Self {
            name: name.into(),
            annual_rate,
            monthly_maintenance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.annual_rate.as_decimal() < Decimal::ZERO || self.annual_rate > Rate::ONE {
            return Err(LendingError::InvalidConfiguration {
                message: format!("bank rate {} is outside 0% to 100%", self.annual_rate),
            });
        }
        if self.monthly_maintenance.is_negative() {
            return Err(LendingError::InvalidConfiguration {
                message: format!("bank maintenance {} is negative", self.monthly_maintenance),
            });
        }
        Ok(())
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl LendingConfig {
    /// default fee tiers, no recurring charges, no bank baseline
    pub fn standard() -> Self {
        Self {
            fee_policy: FeePolicy::default(),
            service_charges: ServiceChargeConfig::new(),
            bank_offer: None,
        }
    }

    pub fn with_fee_policy(mut self, fee_policy: FeePolicy) -> Self {
        self.fee_policy = fee_policy;
        self
    }

    pub fn with_service_charge(mut self, kind: ChargeKind, basis: ChargeBasis) -> Self {
        self.service_charges = self.service_charges.with_charge(kind, basis);
        self
    }

    pub fn with_bank_offer(mut self, bank_offer: BankOffer) -> Self {
        self.bank_offer = Some(bank_offer);
        self
    }

    /// parse and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LendingConfig = serde_json::from_str(json).map_err(|e| LendingError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.fee_policy.validate()?;
        self.service_charges.validate()?;
        if let Some(bank) = &self.bank_offer {
            bank.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fee_policy() {
        let policy = FeePolicy::default();
        assert_eq!(policy.flat_fee_threshold, Money::from_major(10_000));
        assert_eq!(policy.flat_fee_amount, Money::from_major(450));
        assert!(FeePolicy::new(Money::from_major(-1), Money::ZERO).is_err());
    }

    #[test]
    fn test_installment_charge_sums_all_kinds() {
        let charges = ServiceChargeConfig::new()
            .with_charge(ChargeKind::Administrative, ChargeBasis::Flat { amount: Money::from_major(20) })
            .with_charge(ChargeKind::Insurance, ChargeBasis::PercentOfBalance { rate: Rate::from_bps(10) })
            .with_charge(ChargeKind::Platform, ChargeBasis::PercentOfGross { rate: Rate::from_bps(50) });

        // 20 + 0.1% of 5000 + 0.5% of 10000
        let charge = charges.installment_charge(Money::from_major(10_000), Money::from_major(5_000));
        assert_eq!(charge, Money::from_major(75));
    }

    #[test]
    fn test_replacing_a_charge() {
        let charges = ServiceChargeConfig::new()
            .with_charge(ChargeKind::Maintenance, ChargeBasis::Flat { amount: Money::from_major(5) })
            .with_charge(ChargeKind::Maintenance, ChargeBasis::Flat { amount: Money::from_major(8) });

        assert_eq!(charges.iter().count(), 1);
        assert_eq!(
            charges.get(ChargeKind::Maintenance),
            Some(&ChargeBasis::Flat { amount: Money::from_major(8) })
        );
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "fee_policy": { "flat_fee_threshold": "5000", "flat_fee_amount": "300" },
            "service_charges": {
                "administrative": { "basis": "percent_of_balance", "rate": "0.005" },
                "insurance": { "basis": "flat", "amount": "12.50" }
            },
            "bank_offer": { "name": "banco", "annual_rate": "0.30", "monthly_maintenance": "25" }
        }"#;

        let config = LendingConfig::from_json(json).unwrap();
        assert_eq!(config.fee_policy.flat_fee_threshold, Money::from_major(5_000));
        assert_eq!(config.fee_policy.flat_fee_amount, Money::from_major(300));
        assert_eq!(
            config.service_charges.get(ChargeKind::Insurance),
            Some(&ChargeBasis::Flat { amount: Money::from_minor(1_250) })
        );
        assert_eq!(config.bank_offer.as_ref().unwrap().annual_rate, Rate::from_percentage(30));

        let round_trip = LendingConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }

    #[test]
    fn test_config_defaults_when_fields_missing() {
        let config = LendingConfig::from_json("{}").unwrap();
        assert_eq!(config, LendingConfig::standard());
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let bad_bank = r#"{ "bank_offer": { "name": "x", "annual_rate": "1.5", "monthly_maintenance": "0" } }"#;
        assert!(matches!(
            LendingConfig::from_json(bad_bank),
            Err(LendingError::InvalidConfiguration { .. })
        ));

        let bad_charge = r#"{ "service_charges": { "platform": { "basis": "flat", "amount": "-1" } } }"#;
        assert!(LendingConfig::from_json(bad_charge).is_err());

        let unknown_key = r#"{ "service_charges": { "lottery": { "basis": "flat", "amount": "1" } } }"#;
        assert!(LendingConfig::from_json(unknown_key).is_err());

        assert!(LendingConfig::from_json("not json").is_err());
    }
}
