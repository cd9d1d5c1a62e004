use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate, CURRENCY_DP};
use crate::types::{LoanTerms, MAX_TERM_MONTHS};

/// one installment of a french-system schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based installment number
    pub installment: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
}

/// fixed-payment amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    /// installment amount, rounded to cents
    pub payment: Money,
    pub rows: Vec<AmortizationRow>,
    /// rounded to cents once, from the exact per-row interest
    pub total_interest: Money,
}

impl AmortizationSchedule {
    /// generate schedule for validated terms
    pub fn generate(terms: &LoanTerms) -> Self {
        build_schedule(terms.principal, terms.annual_rate, terms.term_months)
    }

    /// schedule with no installments
    pub fn empty(principal: Money, annual_rate: Rate) -> Self {
        Self {
            principal,
            annual_rate,
            term_months: 0,
            payment: Money::ZERO,
            rows: Vec::new(),
            total_interest: Money::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// get row for specific installment
    pub fn get_row(&self, installment: u32) -> Option<&AmortizationRow> {
        let index = installment.checked_sub(1)?;
        self.rows.get(index as usize)
    }

    /// remaining balance after installment, principal before the first
    pub fn balance_after(&self, installment: u32) -> Money {
        self.get_row(installment)
            .map(|row| row.ending_balance)
            .unwrap_or(self.principal)
    }

    /// sum of all installment amounts
    pub fn total_paid(&self) -> Money {
        self.rows.iter().map(|row| row.payment_amount).sum()
    }

    /// sum of principal amortized by the rows
    pub fn total_principal(&self) -> Money {
        self.rows.iter().map(|row| row.principal_portion).sum()
    }

    /// monthly due dates, one per row; month-end days clamp to the shorter month
    pub fn due_dates(&self, first_due: NaiveDate) -> Vec<NaiveDate> {
        (0..self.rows.len() as u32)
            .filter_map(|offset| first_due.checked_add_months(Months::new(offset)))
            .collect()
    }
}

/// annuity payment for principal, nominal annual rate and term
///
/// A zero term yields zero and a zero rate amortizes linearly. Negative
/// inputs are not rejected here; `LoanTerms::new` validates them.
pub fn compute_payment(principal: Money, annual_rate: Rate, term_months: u32) -> Money {
    if term_months == 0 {
        return Money::ZERO;
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        return principal / Decimal::from(term_months);
    }

    // interest only; also the limit of the annuity as (1 + r)^-n vanishes
    let interest_only = principal.as_decimal() * r;

    // payment = P * r / (1 - (1 + r)^-n) = P * r * c / (c - 1), c = (1 + r)^n
    let payment = (Decimal::ONE + r)
        .checked_powu(term_months as u64)
        .filter(|compound| *compound > Decimal::ONE)
        .and_then(|compound| {
            annuity_from_compound(interest_only, compound)
                .or_else(|| annuity_from_discount(interest_only, compound))
        })
        .unwrap_or(interest_only);

    Money::from_decimal(payment)
}

fn annuity_from_compound(interest_only: Decimal, compound: Decimal) -> Option<Decimal> {
    interest_only
        .checked_mul(compound)?
        .checked_div(compound - Decimal::ONE)
}

// P * r * c overflows for large c; 1 / c stays tiny instead
fn annuity_from_discount(interest_only: Decimal, compound: Decimal) -> Option<Decimal> {
    let discount = Decimal::ONE.checked_div(compound)?;
    interest_only.checked_div(Decimal::ONE - discount)
}

/// full schedule; every figure is rounded to cents where it is computed
pub fn build_schedule(principal: Money, annual_rate: Rate, term_months: u32) -> AmortizationSchedule {
    if term_months == 0 {
        return AmortizationSchedule::empty(principal, annual_rate);
    }

    let r = annual_rate.monthly_rate().as_decimal();
    let payment = compute_payment(principal, annual_rate, term_months).round_currency();

    let mut rows = Vec::with_capacity(term_months.min(MAX_TERM_MONTHS) as usize);
    let mut balance = principal;
    let mut raw_interest_total = Decimal::ZERO;

    for installment in 1..=term_months {
        let raw_interest = balance.as_decimal() * r;
        let interest_portion = to_cents(raw_interest);
        let principal_portion = (payment - interest_portion).round_currency();

        // the floor only hides drift on the last row, it is not re-balanced
        let ending_balance = (balance - principal_portion).round_currency().max(Money::ZERO);

        raw_interest_total += raw_interest;

        rows.push(AmortizationRow {
            installment,
            beginning_balance: balance,
            payment_amount: payment,
            principal_portion,
            interest_portion,
            ending_balance,
        });

        balance = ending_balance;
    }

    AmortizationSchedule {
        principal,
        annual_rate,
        term_months,
        payment,
        rows,
        total_interest: to_cents(raw_interest_total),
    }
}

fn to_cents(amount: Decimal) -> Money {
    Money::from_decimal(amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero))
}
