use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};

use super::amortization::{build_schedule, AmortizationSchedule};

/// outcome of a lump extra payment applied to principal, installment held fixed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentResult {
    pub extra_amount: Money,
    pub reduced_principal: Money,
    pub original: AmortizationSchedule,
    pub new_payment: Money,
    pub new_months: u32,
    pub new_schedule: AmortizationSchedule,
    pub interest_saved: Money,
}

impl ExtraPaymentResult {
    pub fn months_saved(&self) -> u32 {
        self.original.term_months.saturating_sub(self.new_months)
    }

    /// the extra payment retired the whole loan
    pub fn is_paid_off(&self) -> bool {
        self.new_months == 0
    }
}

/// apply an extra principal payment and shorten the term, keeping the installment
pub fn apply_extra_payment_reduce_term(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    extra_amount: Money,
) -> Result<ExtraPaymentResult> {
    if extra_amount.is_negative() {
        return Err(LendingError::invalid_input(
            "extra_amount",
            format!("{} is negative", extra_amount),
        ));
    }

    let original = build_schedule(principal, annual_rate, term_months);
    let reduced_principal = (principal - extra_amount).max(Money::ZERO);

    if !reduced_principal.is_positive() {
        let interest_saved = original.total_interest;
        return Ok(ExtraPaymentResult {
            extra_amount,
            reduced_principal,
            new_payment: Money::ZERO,
            new_months: 0,
            new_schedule: AmortizationSchedule::empty(Money::ZERO, annual_rate),
            interest_saved,
            original,
        });
    }

    // rounding the installment to cents can push the solved term a hair past
    // the original one, which an extra payment never justifies
    let solved = calculate_term_for_payment(reduced_principal, annual_rate, original.payment)?;
    let new_months = solved.min(term_months);

    let new_schedule = build_schedule(reduced_principal, annual_rate, new_months);
    let interest_saved = (original.total_interest - new_schedule.total_interest).round_currency();

    Ok(ExtraPaymentResult {
        extra_amount,
        reduced_principal,
        original,
        new_payment: new_schedule.payment,
        new_months,
        new_schedule,
        interest_saved,
    })
}

/// number of installments needed to amortize principal at a fixed payment
///
/// Solves the annuity formula for n: n = -ln(1 - P*r/payment) / ln(1 + r),
/// rounded up and never below one. A payment that does not cover the first
/// month's interest never amortizes and is rejected.
pub fn calculate_term_for_payment(principal: Money, annual_rate: Rate, payment: Money) -> Result<u32> {
    if !principal.is_positive() {
        return Ok(0);
    }

    let r = annual_rate.monthly_rate().as_decimal();
    let first_interest = Money::from_decimal(principal.as_decimal() * r).round_currency();

    if !payment.is_positive() {
        return Err(LendingError::NonAmortizingPayment {
            payment,
            first_interest,
        });
    }

    if r.is_zero() {
        return to_months((principal.as_decimal() / payment.as_decimal()).ceil());
    }

    let ratio = Decimal::ONE - principal.as_decimal() * r / payment.as_decimal();
    if ratio <= Decimal::ZERO {
        return Err(LendingError::NonAmortizingPayment {
            payment,
            first_interest,
        });
    }

    let numerator = ratio.checked_ln().ok_or_else(|| LendingError::CalculationError {
        message: format!("logarithm of amortization ratio {} is undefined", ratio),
    })?;
    let denominator = (Decimal::ONE + r)
        .checked_ln()
        .filter(|ln| !ln.is_zero())
        .ok_or_else(|| LendingError::CalculationError {
            message: format!("logarithm of growth factor for monthly rate {} is undefined", r),
        })?;

    let months = to_months((-numerator / denominator).ceil())?;
    Ok(months.max(1))
}

fn to_months(n: Decimal) -> Result<u32> {
    n.to_u32().ok_or_else(|| LendingError::CalculationError {
        message: format!("term of {} months is not representable", n),
    })
}
