//! unitalg Core - Fundamental types
//!
//! This crate provides the core types used throughout unitalg:
//! - `UnitError`: Structured errors for dimensional arithmetic
//! - `NumericStrategy`: Pluggable arithmetic for quantity payloads
//! - `Number`: Arbitrary precision decimal payload

mod error;
mod number;
mod strategy;

pub use error::{codes, UnitError};
pub use number::{Number, NumberError};
pub use strategy::{integer_exponent, DecimalStrategy, NumericStrategy, RationalStrategy, RealStrategy};

/// Re-exported so callers of `RationalStrategy` need no direct dashu dependency
pub use dashu_ratio::RBig;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumericStrategy, RealStrategy, UnitError};
    pub use crate::error::codes;
}
