//! Named-unit registries
//!
//! Three process-wide registries hold metadata about unit symbols:
//! physical units (dimension basis, scale factor, aliases), algebraic
//! elements (minimal polynomials) and symbolic numbers (LaTeX, approximate
//! value). Quantity arithmetic does not consult them; they are storage for
//! conversion and simplification built on top.
//!
//! Each registry sits behind an `RwLock`, so registering while other
//! threads look up is safe.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DimensionMap;

/// Global physical unit registry, seeded with SI placeholders
pub static PHYSICAL_UNITS: LazyLock<PhysicalRegistry> = LazyLock::new(PhysicalRegistry::with_si_base);

/// Global algebraic element registry
pub static ALGEBRAIC_UNITS: LazyLock<Registry<AlgebraicUnitDef>> =
    LazyLock::new(|| Registry::new("algebraic"));

/// Global symbolic number registry
pub static SYMBOLIC_NUMBERS: LazyLock<Registry<SymbolicNumberDef>> =
    LazyLock::new(|| Registry::new("symbolic"));

/// A physical unit expressed against base dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalUnitDef {
    /// Dimensional basis, e.g. `{m: 1, s: -2}`
    pub dims: DimensionMap,
    /// Scale to base units of the same dimensions
    pub factor: f64,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl PhysicalUnitDef {
    pub fn new(dims: DimensionMap, factor: f64) -> Self {
        PhysicalUnitDef { dims, factor, aliases: Vec::new() }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// An adjoined algebraic element, e.g. `i` with minimal polynomial `x^2+1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgebraicUnitDef {
    pub minimal_polynomial: String,
}

/// A symbolic constant kept exact, e.g. `pi`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolicNumberDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approx: Option<f64>,
}

/// Name-keyed registry of definitions
pub struct Registry<D> {
    kind: &'static str,
    entries: RwLock<HashMap<String, D>>,
}

impl<D: Clone> Registry<D> {
    pub fn new(kind: &'static str) -> Self {
        Registry { kind, entries: RwLock::new(HashMap::new()) }
    }

    /// Register (or replace) a definition
    pub fn register(&self, name: impl Into<String>, def: D) {
        let name = name.into();
        debug!(kind = self.kind, name = %name, "registering unit");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, def);
    }

    pub fn get(&self, name: &str) -> Option<D> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[derive(Default)]
struct PhysicalTable {
    units: HashMap<String, PhysicalUnitDef>,
    aliases: HashMap<String, String>,
}

/// Registry of physical units with alias resolution
pub struct PhysicalRegistry {
    table: RwLock<PhysicalTable>,
}

impl PhysicalRegistry {
    pub fn new() -> Self {
        PhysicalRegistry { table: RwLock::new(PhysicalTable::default()) }
    }

    /// Registry holding the SI base placeholders `m`, `s` and `kg`
    pub fn with_si_base() -> Self {
        let registry = Self::new();
        for symbol in ["m", "s", "kg"] {
            registry.register(symbol, PhysicalUnitDef::new(DimensionMap::single(symbol, 1), 1.0));
        }
        registry
    }

    /// Register a unit under `name` and each of its aliases
    pub fn register(&self, name: impl Into<String>, def: PhysicalUnitDef) {
        let name = name.into();
        debug!(kind = "physical", name = %name, aliases = ?def.aliases, "registering unit");
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        for alias in &def.aliases {
            table.aliases.insert(alias.clone(), name.clone());
        }
        table.units.insert(name, def);
    }

    /// Get a unit by name or alias.
    ///
    /// Through an alias, the returned aliases list starts with the
    /// canonical name.
    pub fn get(&self, name: &str) -> Option<PhysicalUnitDef> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(def) = table.units.get(name) {
            return Some(def.clone());
        }
        let canonical = table.aliases.get(name)?;
        let def = table.units.get(canonical)?;
        let mut aliases = Vec::with_capacity(def.aliases.len() + 1);
        aliases.push(canonical.clone());
        aliases.extend(def.aliases.iter().cloned());
        Some(PhysicalUnitDef { aliases, ..def.clone() })
    }

    pub fn contains(&self, name: &str) -> bool {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table.units.contains_key(name) || table.aliases.contains_key(name)
    }

    /// Canonical unit names, sorted
    pub fn names(&self) -> Vec<String> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = table.units.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for PhysicalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ========== Global registry shortcuts ==========

pub fn register_physical_unit(name: impl Into<String>, def: PhysicalUnitDef) {
    PHYSICAL_UNITS.register(name, def);
}

pub fn physical_unit(name: &str) -> Option<PhysicalUnitDef> {
    PHYSICAL_UNITS.get(name)
}

pub fn register_algebraic_unit(name: impl Into<String>, def: AlgebraicUnitDef) {
    ALGEBRAIC_UNITS.register(name, def);
}

pub fn algebraic_unit(name: &str) -> Option<AlgebraicUnitDef> {
    ALGEBRAIC_UNITS.get(name)
}

pub fn register_symbolic_number(name: impl Into<String>, def: SymbolicNumberDef) {
    SYMBOLIC_NUMBERS.register(name, def);
}

pub fn symbolic_number(name: &str) -> Option<SymbolicNumberDef> {
    SYMBOLIC_NUMBERS.get(name)
}
