//! unitalg Units - Dimensional algebra for generic quantities
//!
//! Attaches dimensional metadata to values and enforces consistency
//! during arithmetic. Every quantity carries three independent maps:
//! - Physical: SI-like units (m, kg, s, ...)
//! - Algebraic: adjoined elements such as the imaginary unit `i`
//! - Symbolic: exact constants such as `pi`
//!
//! Addition and subtraction require all three maps to match exactly;
//! multiplication, division and integer powers combine them. Values are
//! combined by the numeric strategy of an explicit [`Context`].
//!
//! ```
//! use unitalg_units::{Context, Quantity, RealStrategy};
//!
//! let ctx = Context::new(RealStrategy);
//! let distance = Quantity::physical(2.0, "m").unwrap();
//! let time = Quantity::physical(3.0, "s").unwrap();
//! let speed = distance.div(&time, &ctx).unwrap();
//! assert_eq!(speed.to_string(), "0.6666666666666666 m*s^-1");
//! ```

mod context;
mod dimension;
mod parse;
mod quantity;
mod registry;

pub use context::{set_simplify_mode, simplify_mode, Context, SimplifyMode};
pub use dimension::{DimensionMap, Dimensions, IntoDimensions};
pub use parse::{parse_dimensions, parse_quantity};
pub use quantity::Quantity;
pub use registry::{
    algebraic_unit, physical_unit, register_algebraic_unit, register_physical_unit,
    register_symbolic_number, symbolic_number, AlgebraicUnitDef, PhysicalRegistry,
    PhysicalUnitDef, Registry, SymbolicNumberDef, ALGEBRAIC_UNITS, PHYSICAL_UNITS,
    SYMBOLIC_NUMBERS,
};

pub use unitalg_core::{
    DecimalStrategy, Number, NumericStrategy, RationalStrategy, RealStrategy, UnitError,
};
