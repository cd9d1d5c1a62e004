use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ServiceChargeConfig;
use crate::decimal::{Money, Rate};
use crate::payments::{build_schedule, AmortizationSchedule};

use super::gross_up::GrossUp;

/// cost of a platform loan under the fee policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub net_amount: Money,
    pub gross_amount: Money,
    pub origination_fee: Money,
    pub borrower_rate: Rate,
    pub term_months: u32,
    /// annuity installment before service charges
    pub annuity_payment: Money,
    pub total_interest: Money,
    /// average recurring charge per installment
    pub avg_service_fee: Money,
    /// avg_service_fee over the whole term
    pub total_service_fees: Money,
    pub monthly_payment_total: Money,
    pub total_cost_of_credit: Money,
    pub total_payable: Money,
}

/// breakdown from a gross-up; builds the borrower schedule on the gross amount
pub fn compute_breakdown(
    gross_up: &GrossUp,
    borrower_rate: Rate,
    term_months: u32,
    service_charges: &ServiceChargeConfig,
) -> FeeBreakdown {
    let schedule = build_schedule(gross_up.gross_amount, borrower_rate, term_months);
    breakdown_from_schedule(gross_up, &schedule, service_charges)
}

/// breakdown over an already built schedule of the gross amount
pub fn breakdown_from_schedule(
    gross_up: &GrossUp,
    schedule: &AmortizationSchedule,
    service_charges: &ServiceChargeConfig,
) -> FeeBreakdown {
    let term_months = schedule.rows.len() as u32;

    let charged: Money = schedule
        .rows
        .iter()
        .map(|row| service_charges.installment_charge(gross_up.gross_amount, row.beginning_balance))
        .sum();

    let avg_service_fee = if term_months == 0 {
        Money::ZERO
    } else {
        (charged / Decimal::from(term_months)).round_currency()
    };
    let total_service_fees = (avg_service_fee * Decimal::from(term_months)).round_currency();

    let total_cost_of_credit =
        (schedule.total_interest + total_service_fees + gross_up.origination_fee).round_currency();

    // the origination fee is withheld from the gross at disbursement, not repaid again
    let total_payable = (gross_up.gross_amount + total_cost_of_credit - gross_up.origination_fee).round_currency();

    FeeBreakdown {
        net_amount: gross_up.net_amount,
        gross_amount: gross_up.gross_amount,
        origination_fee: gross_up.origination_fee,
        borrower_rate: schedule.annual_rate,
        term_months,
        annuity_payment: schedule.payment,
        total_interest: schedule.total_interest,
        avg_service_fee,
        total_service_fees,
        monthly_payment_total: (schedule.payment + avg_service_fee).round_currency(),
        total_cost_of_credit,
        total_payable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeePolicy;
    use crate::types::{ChargeBasis, ChargeKind};
    use rust_decimal_macros::dec;

    fn money(d: Decimal) -> Money {
        Money::from_decimal(d)
    }

    fn gross_up(net: Money, fee_percent: Decimal) -> GrossUp {
        FeePolicy::default()
            .gross_from_net(net, Rate::from_percent(fee_percent), None)
            .unwrap()
    }

    #[test]
    fn test_breakdown_with_balance_charge() {
        let gross_up = gross_up(Money::from_major(50_000), dec!(5));
        let charges = ServiceChargeConfig::new().with_charge(
            ChargeKind::Administrative,
            ChargeBasis::PercentOfBalance { rate: Rate::from_percent(dec!(1)) },
        );

        let breakdown = compute_breakdown(&gross_up, Rate::from_percent(dec!(18)), 12, &charges);

        assert_eq!(breakdown.gross_amount, money(dec!(52631.58)));
        assert_eq!(breakdown.origination_fee, money(dec!(2631.58)));
        assert_eq!(breakdown.annuity_payment, money(dec!(4825.26)));
        assert_eq!(breakdown.total_interest, money(dec!(5271.58)));
        assert_eq!(breakdown.avg_service_fee, money(dec!(292.87)));
        assert_eq!(breakdown.total_service_fees, money(dec!(3514.44)));
        assert_eq!(breakdown.monthly_payment_total, money(dec!(5118.13)));
        assert_eq!(breakdown.total_cost_of_credit, money(dec!(11417.60)));
        assert_eq!(breakdown.total_payable, money(dec!(61417.60)));
    }

    #[test]
    fn test_total_payable_identity() {
        let gross_up = gross_up(Money::from_major(20_000), dec!(4));
        let charges = ServiceChargeConfig::new()
            .with_charge(ChargeKind::Insurance, ChargeBasis::Flat { amount: Money::from_major(10) })
            .with_charge(ChargeKind::Platform, ChargeBasis::PercentOfGross { rate: Rate::from_bps(20) });

        let breakdown = compute_breakdown(&gross_up, Rate::from_percent(dec!(24)), 24, &charges);

        assert_eq!(
            breakdown.total_payable,
            breakdown.gross_amount + breakdown.total_interest + breakdown.total_service_fees
        );
        assert_eq!(
            breakdown.total_payable,
            breakdown.gross_amount + breakdown.total_cost_of_credit - breakdown.origination_fee
        );
        // 10 + 0.2% of 20833.33 every month
        assert_eq!(breakdown.avg_service_fee, money(dec!(51.67)));
        assert!(breakdown.gross_amount >= breakdown.net_amount);
    }

    #[test]
    fn test_breakdown_without_charges() {
        let gross_up = gross_up(Money::from_major(10_000), dec!(3));
        let breakdown = compute_breakdown(&gross_up, Rate::from_percent(dec!(18)), 12, &ServiceChargeConfig::new());

        assert_eq!(breakdown.gross_amount, Money::from_major(10_450));
        assert_eq!(breakdown.avg_service_fee, Money::ZERO);
        assert_eq!(breakdown.monthly_payment_total, breakdown.annuity_payment);
        assert_eq!(breakdown.annuity_payment, money(dec!(958.06)));
        assert_eq!(breakdown.total_interest, money(dec!(1046.67)));
        assert_eq!(breakdown.total_cost_of_credit, money(dec!(1496.67)));
        assert_eq!(breakdown.total_payable, money(dec!(11496.67)));
    }

    #[test]
    fn test_zero_term_breakdown() {
        let gross_up = gross_up(Money::from_major(5_000), dec!(0));
        let charges = ServiceChargeConfig::new()
            .with_charge(ChargeKind::Maintenance, ChargeBasis::Flat { amount: Money::from_major(5) });

        let breakdown = compute_breakdown(&gross_up, Rate::from_percent(dec!(12)), 0, &charges);

        assert_eq!(breakdown.term_months, 0);
        assert_eq!(breakdown.annuity_payment, Money::ZERO);
        assert_eq!(breakdown.avg_service_fee, Money::ZERO);
        assert_eq!(breakdown.total_cost_of_credit, Money::from_major(450));
        assert_eq!(breakdown.total_payable, Money::from_major(5_450));
    }
}
