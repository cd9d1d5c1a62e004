use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};

/// unique identifier for a calculated quote
pub type QuoteId = Uuid;

/// longest term accepted for a loan: 100 years of monthly installments
pub const MAX_TERM_MONTHS: u32 = 1_200;

/// principal, nominal annual rate and term of a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

impl LoanTerms {
    /// validated terms: principal >= 0, rate within 0..=100%, term up to `MAX_TERM_MONTHS`
    pub fn new(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Self> {
        if principal.is_negative() {
            return Err(LendingError::invalid_input("principal", format!("{} is negative", principal)));
        }
        if annual_rate.as_decimal() < Decimal::ZERO || annual_rate > Rate::ONE {
            return Err(LendingError::invalid_input(
                "annual_rate",
                format!("{} is outside 0% to 100%", annual_rate),
            ));
        }
        if term_months > MAX_TERM_MONTHS {
            return Err(LendingError::invalid_input(
                "term_months",
                format!("{} exceeds {} months", term_months, MAX_TERM_MONTHS),
            ));
        }

        Ok(Self {
            principal,
            annual_rate,
            term_months,
        })
    }

    /// terms from a percentage figure, as entered on a loan form
    pub fn from_percent(principal: Money, annual_rate_percent: Decimal, term_months: u32) -> Result<Self> {
        Self::new(principal, Rate::from_percent(annual_rate_percent), term_months)
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }

    /// term of zero means there is nothing to amortize
    pub fn has_schedule(&self) -> bool {
        self.term_months > 0
    }
}

/// recognized keys for recurring per-installment charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    /// platform administration
    Administrative,
    /// credit life insurance add-on
    Insurance,
    Platform,
    /// account maintenance
    Maintenance,
}

/// how a recurring charge is evaluated each installment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum ChargeBasis {
    /// fixed amount every installment
    Flat { amount: Money },
    /// monthly rate over the gross (bruto) amount
    PercentOfGross { rate: Rate },
    /// monthly rate over the installment's opening balance
    PercentOfBalance { rate: Rate },
}

impl ChargeBasis {
    /// charge for one installment
    pub fn charge(&self, gross_amount: Money, opening_balance: Money) -> Money {
        match self {
            ChargeBasis::Flat { amount } => *amount,
            ChargeBasis::PercentOfGross { rate } => gross_amount.apply(*rate),
            ChargeBasis::PercentOfBalance { rate } => opening_balance.apply(*rate),
        }
    }
}

/// origination fee tier that produced a gross amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeTier {
    /// small loan, flat origination fee
    Flat,
    /// percentage gross-up
    Percentage,
    /// caller-supplied nominal gross
    Nominal,
}
