//! Numeric strategies - pluggable arithmetic for quantity payloads
//!
//! A strategy supplies the closed set of operations a quantity needs from
//! its value type. Sign handling for negative powers and the zero-power
//! identity belong to the caller; `pow` only ever sees a magnitude.

use dashu_ratio::RBig;
use num_traits::Float;

use crate::{Number, UnitError};

/// Arithmetic capability over a payload type `T`
pub trait NumericStrategy<T> {
    fn add(&self, a: &T, b: &T) -> Result<T, UnitError>;

    fn sub(&self, a: &T, b: &T) -> Result<T, UnitError>;

    fn mul(&self, a: &T, b: &T) -> Result<T, UnitError>;

    fn div(&self, a: &T, b: &T) -> Result<T, UnitError>;

    /// Raise `base` to a non-negative integer power
    fn pow(&self, base: &T, exp: u32) -> Result<T, UnitError>;

    /// Multiplicative identity
    fn one(&self) -> T;

    /// Multiplicative inverse
    fn reciprocal(&self, a: &T) -> Result<T, UnitError> {
        self.div(&self.one(), a)
    }
}

/// Validate a runtime-typed exponent and narrow it to `i32`.
///
/// Non-integer or non-finite exponents are argument errors; integers that
/// don't fit are arithmetic errors.
pub fn integer_exponent(n: f64) -> Result<i32, UnitError> {
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(UnitError::argument(format!("exponent must be an integer, got {}", n)));
    }
    if n < i32::MIN as f64 || n > i32::MAX as f64 {
        return Err(UnitError::arithmetic(format!("exponent {} out of range", n)));
    }
    Ok(n as i32)
}

// ========== Real numbers ==========

/// IEEE-754 arithmetic for any `num_traits::Float` (f64, f32).
///
/// Follows float semantics: division by zero yields an infinity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealStrategy;

impl<F: Float> NumericStrategy<F> for RealStrategy {
    fn add(&self, a: &F, b: &F) -> Result<F, UnitError> {
        Ok(*a + *b)
    }

    fn sub(&self, a: &F, b: &F) -> Result<F, UnitError> {
        Ok(*a - *b)
    }

    fn mul(&self, a: &F, b: &F) -> Result<F, UnitError> {
        Ok(*a * *b)
    }

    fn div(&self, a: &F, b: &F) -> Result<F, UnitError> {
        Ok(*a / *b)
    }

    fn pow(&self, base: &F, exp: u32) -> Result<F, UnitError> {
        let exp = i32::try_from(exp)
            .map_err(|_| UnitError::arithmetic(format!("exponent {} out of range", exp)))?;
        Ok(base.powi(exp))
    }

    fn one(&self) -> F {
        F::one()
    }
}

// ========== Arbitrary precision decimals ==========

/// Arithmetic over [`Number`]. Division by zero is an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalStrategy;

impl NumericStrategy<Number> for DecimalStrategy {
    fn add(&self, a: &Number, b: &Number) -> Result<Number, UnitError> {
        Ok(a.add(b))
    }

    fn sub(&self, a: &Number, b: &Number) -> Result<Number, UnitError> {
        Ok(a.sub(b))
    }

    fn mul(&self, a: &Number, b: &Number) -> Result<Number, UnitError> {
        Ok(a.mul(b))
    }

    fn div(&self, a: &Number, b: &Number) -> Result<Number, UnitError> {
        Ok(a.checked_div(b)?)
    }

    fn pow(&self, base: &Number, exp: u32) -> Result<Number, UnitError> {
        Ok(base.pow(exp))
    }

    fn one(&self) -> Number {
        Number::one()
    }
}

// ========== Exact rationals ==========

/// Exact arithmetic over dashu's `RBig`. Division by zero is an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RationalStrategy;

impl NumericStrategy<RBig> for RationalStrategy {
    fn add(&self, a: &RBig, b: &RBig) -> Result<RBig, UnitError> {
        Ok(a + b)
    }

    fn sub(&self, a: &RBig, b: &RBig) -> Result<RBig, UnitError> {
        Ok(a - b)
    }

    fn mul(&self, a: &RBig, b: &RBig) -> Result<RBig, UnitError> {
        Ok(a * b)
    }

    fn div(&self, a: &RBig, b: &RBig) -> Result<RBig, UnitError> {
        if *b == RBig::ZERO {
            return Err(UnitError::arithmetic("division by zero"));
        }
        Ok(a / b)
    }

    fn pow(&self, base: &RBig, exp: u32) -> Result<RBig, UnitError> {
        let mut result = RBig::ONE;
        let mut square = base.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = &result * &square;
            }
            e >>= 1;
            if e > 0 {
                square = &square * &square;
            }
        }
        Ok(result)
    }

    fn one(&self) -> RBig {
        RBig::ONE
    }
}
