//! Quantity type - a value with three independent dimension maps

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unitalg_core::{integer_exponent, NumericStrategy, RealStrategy, UnitError};

use crate::dimension::IntoDimensions;
use crate::{Context, DimensionMap, Dimensions};

/// A value carrying physical, algebraic and symbolic dimensions.
///
/// Quantities are never mutated; every operation returns a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity<T> {
    value: T,
    dimensions: Dimensions,
}

impl<T> Quantity<T> {
    /// Create a quantity from a value and a full dimension triple
    pub fn new(value: T, dimensions: Dimensions) -> Self {
        Quantity { value, dimensions }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: T) -> Self {
        Quantity::new(value, Dimensions::none())
    }

    /// Quantity with only physical dimensions, e.g. `Quantity::physical(9.81, "m/s^2")`
    pub fn physical(value: T, spec: impl IntoDimensions) -> Result<Self, UnitError> {
        Ok(Quantity::new(value, Dimensions::physical(spec.into_dimensions()?)))
    }

    /// Quantity with only algebraic dimensions, e.g. `Quantity::algebraic(3.0, "i")`
    pub fn algebraic(value: T, spec: impl IntoDimensions) -> Result<Self, UnitError> {
        Ok(Quantity::new(value, Dimensions::algebraic(spec.into_dimensions()?)))
    }

    /// Quantity with only symbolic dimensions, e.g. `Quantity::symbolic(2.0, "pi")`
    pub fn symbolic(value: T, spec: impl IntoDimensions) -> Result<Self, UnitError> {
        Ok(Quantity::new(value, Dimensions::symbolic(spec.into_dimensions()?)))
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn physical_dimensions(&self) -> &DimensionMap {
        &self.dimensions.physical
    }

    pub fn algebraic_dimensions(&self) -> &DimensionMap {
        &self.dimensions.algebraic
    }

    pub fn symbolic_dimensions(&self) -> &DimensionMap {
        &self.dimensions.symbolic
    }

    /// True if all three dimension maps are empty
    pub fn is_unitless(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Check if two quantities can be added (all three maps equal)
    pub fn is_compatible(&self, other: &Quantity<T>) -> bool {
        self.dimensions == other.dimensions
    }

    fn check_compatible(&self, other: &Quantity<T>, op: &'static str) -> Result<(), UnitError> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(UnitError::incompatible(
                op,
                self.dimensions.to_string(),
                other.dimensions.to_string(),
            ))
        }
    }

    /// Add two quantities (all dimensions must match)
    pub fn add<S: NumericStrategy<T>>(&self, other: &Quantity<T>, ctx: &Context<S>) -> Result<Quantity<T>, UnitError> {
        self.check_compatible(other, "addition")?;
        let value = ctx.strategy().add(&self.value, &other.value)?;
        Ok(Quantity::new(value, self.dimensions.clone()))
    }

    /// Subtract two quantities (all dimensions must match)
    pub fn sub<S: NumericStrategy<T>>(&self, other: &Quantity<T>, ctx: &Context<S>) -> Result<Quantity<T>, UnitError> {
        self.check_compatible(other, "subtraction")?;
        let value = ctx.strategy().sub(&self.value, &other.value)?;
        Ok(Quantity::new(value, self.dimensions.clone()))
    }

    /// Multiply two quantities (exponents add, never a unit mismatch)
    pub fn mul<S: NumericStrategy<T>>(&self, other: &Quantity<T>, ctx: &Context<S>) -> Result<Quantity<T>, UnitError> {
        let value = ctx.strategy().mul(&self.value, &other.value)?;
        let dimensions = self.dimensions.multiply(&other.dimensions)?;
        Ok(Quantity::new(value, dimensions))
    }

    /// Divide two quantities (exponents subtract, never a unit mismatch)
    pub fn div<S: NumericStrategy<T>>(&self, other: &Quantity<T>, ctx: &Context<S>) -> Result<Quantity<T>, UnitError> {
        let value = ctx.strategy().div(&self.value, &other.value)?;
        let dimensions = self.dimensions.divide(&other.dimensions)?;
        Ok(Quantity::new(value, dimensions))
    }

    /// Raise quantity to an integer power
    ///
    /// `pow(0)` is the dimensionless identity, even for a zero value.
    pub fn pow<S: NumericStrategy<T>>(&self, n: i32, ctx: &Context<S>) -> Result<Quantity<T>, UnitError> {
        let strategy = ctx.strategy();
        if n == 0 {
            return Ok(Quantity::dimensionless(strategy.one()));
        }

        let dimensions = self.dimensions.scale(n)?;
        let magnitude = strategy.pow(&self.value, n.unsigned_abs())?;
        let value = if n > 0 {
            magnitude
        } else {
            strategy.reciprocal(&magnitude)?
        };
        Ok(Quantity::new(value, dimensions))
    }

    /// Raise quantity to a runtime-typed power, which must be an integer
    pub fn powf<S: NumericStrategy<T>>(&self, n: f64, ctx: &Context<S>) -> Result<Quantity<T>, UnitError> {
        self.pow(integer_exponent(n)?, ctx)
    }
}

impl<T: Clone> Quantity<T> {
    /// Express in `target` physical units.
    ///
    /// Only the identity conversion is supported: the target must equal the
    /// current physical map. Scaling between compatible units is not done.
    pub fn convert_to(&self, target: impl IntoDimensions) -> Result<Quantity<T>, UnitError> {
        let target = target.into_dimensions()?;
        if target == self.dimensions.physical {
            return Ok(self.clone());
        }
        Err(UnitError::not_implemented(format!(
            "conversion from '{}' to '{}'",
            self.dimensions.physical, target
        )))
    }
}

impl<T: fmt::Display> fmt::Display for Quantity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unitless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.dimensions)
        }
    }
}

impl FromStr for Quantity<f64> {
    type Err = UnitError;

    /// Parse "5 m" style strings into a physical quantity
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, dims) = crate::parse::parse_quantity(s)?;
        Ok(Quantity::new(value, Dimensions::physical(dims)))
    }
}

// ========== Operator sugar (default real context) ==========
//
// Implemented on references only: a by-value impl would shadow the
// inherent `add(&self, ..)` methods during method lookup.

macro_rules! impl_real_op {
    ($trait:ident, $method:ident) => {
        impl $trait for &Quantity<f64> {
            type Output = Result<Quantity<f64>, UnitError>;

            fn $method(self, rhs: Self) -> Self::Output {
                Quantity::$method(self, rhs, &Context::<RealStrategy>::default())
            }
        }
    };
}

impl_real_op!(Add, add);
impl_real_op!(Sub, sub);
impl_real_op!(Mul, mul);
impl_real_op!(Div, div);
