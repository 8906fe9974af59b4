//! Structured errors for dimensional arithmetic
//!
//! Every failure is a value returned from the operation that detected it.
//! Nothing is retried or coerced; unit mismatches always surface.

use crate::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const ARG_ERROR: &str = "ARG_ERROR";
    pub const ARITHMETIC_ERROR: &str = "ARITHMETIC_ERROR";
    pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";
}

/// Error type shared by parsing, dimension algebra and quantity arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Malformed unit-expression or quantity text
    #[error("Invalid unit expression '{input}' at index {index}: {message}")]
    Parse {
        input: String,
        index: usize,
        message: String,
    },

    /// Addition or subtraction across differing dimension triples
    #[error("Incompatible units for {op}: '{left}' vs '{right}'")]
    IncompatibleUnits {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl UnitError {
    // ========== Common Error Constructors ==========

    pub fn parse(input: impl Into<String>, index: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            index,
            message: message.into(),
        }
    }

    pub fn incompatible(op: &'static str, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::IncompatibleUnits {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn argument(details: impl Into<String>) -> Self {
        Self::Argument(details.into())
    }

    pub fn arithmetic(details: impl Into<String>) -> Self {
        Self::Arithmetic(details.into())
    }

    pub fn not_implemented(details: impl Into<String>) -> Self {
        Self::NotImplemented(details.into())
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => codes::PARSE_ERROR,
            Self::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
            Self::Argument(_) => codes::ARG_ERROR,
            Self::Arithmetic(_) => codes::ARITHMETIC_ERROR,
            Self::NotImplemented(_) => codes::NOT_IMPLEMENTED,
        }
    }
}

impl From<NumberError> for UnitError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::parse(s, 0, "invalid number"),
            NumberError::DivisionByZero => Self::arithmetic("division by zero"),
            NumberError::DomainError(s) => Self::arithmetic(format!("domain error: {}", s)),
            NumberError::Overflow => Self::arithmetic("numeric overflow"),
        }
    }
}
