use thiserror::Error;

/// Errors produced while validating loan inputs or computing a loan.
#[derive(Debug, Error)]
pub enum LoanError {
    /// An input is outside the range accepted at the boundary.
    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A loan needs at least one payment period.
    #[error("loan term must be at least one period")]
    ZeroPeriods,

    /// A decimal operation overflowed or divided by zero.
    #[error("arithmetic failure during {operation}")]
    Arithmetic { operation: &'static str },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoanError {
    pub(crate) fn arithmetic(operation: &'static str) -> Self {
        LoanError::Arithmetic { operation }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
