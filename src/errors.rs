use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LendingError {
    #[error("invalid input: {field} ({reason})")]
    InvalidInput {
        field: String,
        reason: String,
    },

    #[error("non-amortizing payment: payment {payment} does not cover first interest {first_interest}")]
    NonAmortizingPayment {
        payment: Money,
        first_interest: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl LendingError {
    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        LendingError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LendingError {
    fn from(e: serde_json::Error) -> Self {
        LendingError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LendingError>;
