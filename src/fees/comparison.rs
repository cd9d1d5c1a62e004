use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BankOffer;
use crate::decimal::{Money, Rate};
use crate::payments::build_schedule;

use super::breakdown::FeeBreakdown;

/// the same net amount borrowed from a traditional bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankBaseline {
    pub bank_name: String,
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub monthly_maintenance: Money,
    pub monthly_payment_total: Money,
    pub total_interest: Money,
    pub total_maintenance: Money,
    pub total_payable: Money,
}

impl BankBaseline {
    pub fn compute(offer: &BankOffer, principal: Money, term_months: u32) -> Self {
        let schedule = build_schedule(principal, offer.annual_rate, term_months);
        let total_maintenance = (offer.monthly_maintenance * Decimal::from(term_months)).round_currency();

        Self {
            bank_name: offer.name.clone(),
            principal,
            annual_rate: offer.annual_rate,
            term_months,
            monthly_payment: schedule.payment,
            monthly_maintenance: offer.monthly_maintenance,
            monthly_payment_total: (schedule.payment + offer.monthly_maintenance).round_currency(),
            total_interest: schedule.total_interest,
            total_maintenance,
            total_payable: (principal + schedule.total_interest + total_maintenance).round_currency(),
        }
    }
}

/// platform loan next to the bank baseline; differences are platform minus bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankComparison {
    pub bank: BankBaseline,
    pub monthly_payment_difference: Money,
    pub total_payable_difference: Money,
}

impl BankComparison {
    /// negative differences mean the platform loan costs less
    pub fn platform_is_cheaper(&self) -> bool {
        self.total_payable_difference.is_negative()
    }

    pub fn savings(&self) -> Money {
        (Money::ZERO - self.total_payable_difference).max(Money::ZERO)
    }
}

/// compare a platform breakdown with a bank lending the same net amount
pub fn compare_with_bank(breakdown: &FeeBreakdown, offer: &BankOffer) -> BankComparison {
    let bank = BankBaseline::compute(offer, breakdown.net_amount, breakdown.term_months);

    BankComparison {
        monthly_payment_difference: breakdown.monthly_payment_total - bank.monthly_payment_total,
        total_payable_difference: breakdown.total_payable - bank.total_payable,
        bank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeePolicy, ServiceChargeConfig};
    use crate::fees::compute_breakdown;
    use rust_decimal_macros::dec;

    fn money(d: Decimal) -> Money {
        Money::from_decimal(d)
    }

    #[test]
    fn test_bank_baseline() {
        let offer = BankOffer::new("banco", Rate::from_percent(dec!(30)), Money::from_major(25));
        let bank = BankBaseline::compute(&offer, Money::from_major(50_000), 12);

        assert_eq!(bank.monthly_payment, money(dec!(4874.36)));
        assert_eq!(bank.monthly_payment_total, money(dec!(4899.36)));
        assert_eq!(bank.total_interest, money(dec!(8492.27)));
        assert_eq!(bank.total_maintenance, Money::from_major(300));
        assert_eq!(bank.total_payable, money(dec!(58792.27)));
    }

    #[test]
    fn test_platform_against_bank() {
        let gross_up = FeePolicy::default()
            .gross_from_net(Money::from_major(50_000), Rate::from_percent(dec!(5)), None)
            .unwrap();
        let breakdown = compute_breakdown(&gross_up, Rate::from_percent(dec!(18)), 12, &ServiceChargeConfig::new());
        let offer = BankOffer::new("banco", Rate::from_percent(dec!(30)), Money::from_major(25));

        let comparison = compare_with_bank(&breakdown, &offer);

        // 52631.58 + 5271.58 against 58792.27
        assert_eq!(breakdown.total_payable, money(dec!(57903.16)));
        assert_eq!(comparison.total_payable_difference, money(dec!(-889.11)));
        assert_eq!(comparison.monthly_payment_difference, money(dec!(-74.10)));
        assert!(comparison.platform_is_cheaper());
        assert_eq!(comparison.savings(), money(dec!(889.11)));
    }

    #[test]
    fn test_bank_cheaper() {
        let gross_up = FeePolicy::default()
            .gross_from_net(Money::from_major(20_000), Rate::from_percent(dec!(4)), None)
            .unwrap();
        let breakdown = compute_breakdown(&gross_up, Rate::from_percent(dec!(24)), 24, &ServiceChargeConfig::new());
        let offer = BankOffer::new("banco", Rate::from_percent(dec!(12)), Money::ZERO);

        let comparison = compare_with_bank(&breakdown, &offer);

        assert!(!comparison.platform_is_cheaper());
        assert_eq!(comparison.savings(), Money::ZERO);
    }
}
