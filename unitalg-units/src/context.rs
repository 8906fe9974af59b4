//! Arithmetic context
//!
//! Quantity operations take an explicit `Context` carrying the numeric
//! strategy and simplify mode. The only process-wide state is the default
//! simplify mode, held in an atomic.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use unitalg_core::{RealStrategy, UnitError};

/// How dimension maps should be simplified.
///
/// Only zero-cancellation is performed today, whatever the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimplifyMode {
    #[default]
    Auto,
    Manual,
    Step,
}

impl SimplifyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimplifyMode::Auto => "auto",
            SimplifyMode::Manual => "manual",
            SimplifyMode::Step => "step",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            SimplifyMode::Auto => 0,
            SimplifyMode::Manual => 1,
            SimplifyMode::Step => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => SimplifyMode::Manual,
            2 => SimplifyMode::Step,
            _ => SimplifyMode::Auto,
        }
    }
}

impl fmt::Display for SimplifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SimplifyMode {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(SimplifyMode::Auto),
            "manual" => Ok(SimplifyMode::Manual),
            "step" => Ok(SimplifyMode::Step),
            other => Err(UnitError::argument(format!(
                "unknown simplify mode '{}', expected auto, manual or step",
                other
            ))),
        }
    }
}

static SIMPLIFY_MODE: AtomicU8 = AtomicU8::new(0);

/// Set the process-wide default simplify mode picked up by new contexts
pub fn set_simplify_mode(mode: SimplifyMode) {
    debug!(mode = %mode, "simplify mode set");
    SIMPLIFY_MODE.store(mode.to_u8(), Ordering::Relaxed);
}

/// Current process-wide default simplify mode
pub fn simplify_mode() -> SimplifyMode {
    SimplifyMode::from_u8(SIMPLIFY_MODE.load(Ordering::Relaxed))
}

/// Configuration passed to every quantity operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context<S = RealStrategy> {
    strategy: S,
    simplify: SimplifyMode,
}

impl<S> Context<S> {
    /// Context using `strategy` and the process-wide simplify mode
    pub fn new(strategy: S) -> Self {
        let simplify = simplify_mode();
        trace!(strategy = std::any::type_name::<S>(), simplify = %simplify, "context created");
        Self { strategy, simplify }
    }

    /// Swap the numeric strategy, keeping the simplify mode
    pub fn with_strategy<S2>(self, strategy: S2) -> Context<S2> {
        Context { strategy, simplify: self.simplify }
    }

    pub fn with_simplify_mode(mut self, mode: SimplifyMode) -> Self {
        self.simplify = mode;
        self
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn simplify_mode(&self) -> SimplifyMode {
        self.simplify
    }
}

impl Default for Context<RealStrategy> {
    fn default() -> Self {
        Context::new(RealStrategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitalg_core::{DecimalStrategy, NumericStrategy};

    #[test]
    fn test_simplify_mode_parse() {
        assert_eq!("auto".parse::<SimplifyMode>().unwrap(), SimplifyMode::Auto);
        assert_eq!("Manual".parse::<SimplifyMode>().unwrap(), SimplifyMode::Manual);
        assert_eq!(" step ".parse::<SimplifyMode>().unwrap(), SimplifyMode::Step);
        assert!(matches!("eager".parse::<SimplifyMode>(), Err(UnitError::Argument(_))));
    }

    #[test]
    fn test_simplify_mode_serde() {
        assert_eq!(serde_json::to_string(&SimplifyMode::Step).unwrap(), "\"step\"");
        let mode: SimplifyMode = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(mode, SimplifyMode::Manual);
    }

    #[test]
    fn test_u8_mapping() {
        for mode in [SimplifyMode::Auto, SimplifyMode::Manual, SimplifyMode::Step] {
            assert_eq!(SimplifyMode::from_u8(mode.to_u8()), mode);
        }
    }

    #[test]
    fn test_global_simplify_mode() {
        // Only test that touches the global mode
        set_simplify_mode(SimplifyMode::Step);
        assert_eq!(simplify_mode(), SimplifyMode::Step);
        assert_eq!(Context::<RealStrategy>::default().simplify_mode(), SimplifyMode::Step);
        set_simplify_mode(SimplifyMode::Auto);
        assert_eq!(simplify_mode(), SimplifyMode::Auto);
    }

    #[test]
    fn test_builder() {
        let ctx = Context::new(RealStrategy).with_simplify_mode(SimplifyMode::Manual);
        assert_eq!(ctx.simplify_mode(), SimplifyMode::Manual);

        let ctx = ctx.with_strategy(DecimalStrategy);
        assert_eq!(ctx.simplify_mode(), SimplifyMode::Manual);
        assert_eq!(ctx.strategy().one(), unitalg_core::Number::one());
    }
}
