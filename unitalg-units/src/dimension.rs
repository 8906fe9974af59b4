//! Dimension maps - exponents keyed by unit symbol
//!
//! A `DimensionMap` is kept canonical: no entry ever holds exponent 0.
//! Every constructor funnels through `normalize`, and the inner map is
//! private, so the invariant cannot be bypassed.
//!
//! `Dimensions` groups three maps that never merge:
//! physical (SI-like units), algebraic (adjoined elements such as `i`)
//! and symbolic (exact constants such as `pi`).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unitalg_core::UnitError;

/// Canonical mapping from unit symbol to nonzero integer exponent
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct DimensionMap {
    exponents: BTreeMap<String, i32>,
}

impl DimensionMap {
    /// Empty map (dimensionless)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(symbol, exponent)` pairs. Repeated symbols accumulate,
    /// and anything that cancels to zero is dropped.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, UnitError>
    where
        I: IntoIterator<Item = (K, i32)>,
        K: Into<String>,
    {
        let mut map = Self::new();
        for (symbol, exp) in entries {
            map.accumulate(symbol.into(), exp)?;
        }
        Ok(map)
    }

    /// Single symbol raised to `exp`
    pub fn single(symbol: impl Into<String>, exp: i32) -> Self {
        Self::normalize(BTreeMap::from([(symbol.into(), exp)]))
    }

    /// Strip zero-exponent entries
    pub fn normalize(mut exponents: BTreeMap<String, i32>) -> Self {
        exponents.retain(|_, exp| *exp != 0);
        DimensionMap { exponents }
    }

    /// Add `exp` to the exponent of `symbol`, removing it if it cancels
    pub(crate) fn accumulate(&mut self, symbol: String, exp: i32) -> Result<(), UnitError> {
        let current = self.get(&symbol);
        let next = current.checked_add(exp).ok_or_else(|| {
            UnitError::arithmetic(format!("exponent overflow for '{}'", symbol))
        })?;
        if next == 0 {
            self.exponents.remove(&symbol);
        } else {
            self.exponents.insert(symbol, next);
        }
        Ok(())
    }

    /// Exponent of `symbol`, 0 if absent
    pub fn get(&self, symbol: &str) -> i32 {
        self.exponents.get(symbol).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Entries in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.exponents.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.exponents.keys().map(|k| k.as_str())
    }

    /// Multiply unit expressions (add exponents)
    pub fn multiply(&self, other: &DimensionMap) -> Result<DimensionMap, UnitError> {
        let mut result = self.clone();
        for (symbol, exp) in &other.exponents {
            result.accumulate(symbol.clone(), *exp)?;
        }
        Ok(result)
    }

    /// Divide unit expressions (subtract exponents)
    pub fn divide(&self, other: &DimensionMap) -> Result<DimensionMap, UnitError> {
        self.multiply(&other.invert()?)
    }

    /// Multiply every exponent by `n`
    pub fn scale(&self, n: i32) -> Result<DimensionMap, UnitError> {
        let mut exponents = BTreeMap::new();
        for (symbol, exp) in &self.exponents {
            let scaled = exp.checked_mul(n).ok_or_else(|| {
                UnitError::arithmetic(format!("exponent overflow scaling '{}^{}' by {}", symbol, exp, n))
            })?;
            exponents.insert(symbol.clone(), scaled);
        }
        Ok(Self::normalize(exponents))
    }

    /// Negate every exponent
    pub fn invert(&self) -> Result<DimensionMap, UnitError> {
        self.scale(-1)
    }
}

impl fmt::Display for DimensionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, exp)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            if exp == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}^{}", symbol, exp)?;
            }
        }
        Ok(())
    }
}

impl FromStr for DimensionMap {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_dimensions(s)
    }
}

impl From<BTreeMap<String, i32>> for DimensionMap {
    fn from(exponents: BTreeMap<String, i32>) -> Self {
        Self::normalize(exponents)
    }
}

impl From<HashMap<String, i32>> for DimensionMap {
    fn from(exponents: HashMap<String, i32>) -> Self {
        Self::normalize(exponents.into_iter().collect())
    }
}

impl From<DimensionMap> for BTreeMap<String, i32> {
    fn from(map: DimensionMap) -> Self {
        map.exponents
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for DimensionMap {
    /// Last write wins for repeated symbols, unlike `from_entries`
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self::normalize(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The three independent dimension maps of a quantity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub physical: DimensionMap,
    pub algebraic: DimensionMap,
    pub symbolic: DimensionMap,
}

impl Dimensions {
    /// Dimensionless triple
    pub fn none() -> Self {
        Self::default()
    }

    pub fn physical(map: DimensionMap) -> Self {
        Dimensions { physical: map, ..Self::default() }
    }

    pub fn algebraic(map: DimensionMap) -> Self {
        Dimensions { algebraic: map, ..Self::default() }
    }

    pub fn symbolic(map: DimensionMap) -> Self {
        Dimensions { symbolic: map, ..Self::default() }
    }

    /// True if all three maps are empty
    pub fn is_empty(&self) -> bool {
        self.physical.is_empty() && self.algebraic.is_empty() && self.symbolic.is_empty()
    }

    /// Pairwise `multiply` of each map
    pub fn multiply(&self, other: &Dimensions) -> Result<Dimensions, UnitError> {
        Ok(Dimensions {
            physical: self.physical.multiply(&other.physical)?,
            algebraic: self.algebraic.multiply(&other.algebraic)?,
            symbolic: self.symbolic.multiply(&other.symbolic)?,
        })
    }

    /// Pairwise `divide` of each map
    pub fn divide(&self, other: &Dimensions) -> Result<Dimensions, UnitError> {
        Ok(Dimensions {
            physical: self.physical.divide(&other.physical)?,
            algebraic: self.algebraic.divide(&other.algebraic)?,
            symbolic: self.symbolic.divide(&other.symbolic)?,
        })
    }

    /// Scale each map by `n`
    pub fn scale(&self, n: i32) -> Result<Dimensions, UnitError> {
        Ok(Dimensions {
            physical: self.physical.scale(n)?,
            algebraic: self.algebraic.scale(n)?,
            symbolic: self.symbolic.scale(n)?,
        })
    }
}

impl fmt::Display for Dimensions {
    /// Groups in fixed order (physical, algebraic, symbolic), all joined by `*`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for group in [&self.physical, &self.algebraic, &self.symbolic] {
            if group.is_empty() {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            write!(f, "{}", group)?;
            first = false;
        }
        Ok(())
    }
}

/// Anything a quantity factory accepts as a unit spec: an expression to
/// parse, a pre-built map, or `None` for dimensionless.
pub trait IntoDimensions {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError>;
}

impl IntoDimensions for DimensionMap {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        Ok(self)
    }
}

impl IntoDimensions for &DimensionMap {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        Ok(self.clone())
    }
}

impl IntoDimensions for &str {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        crate::parse::parse_dimensions(self)
    }
}

impl IntoDimensions for String {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        crate::parse::parse_dimensions(&self)
    }
}

impl IntoDimensions for &String {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        crate::parse::parse_dimensions(self)
    }
}

impl IntoDimensions for BTreeMap<String, i32> {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        Ok(DimensionMap::from(self))
    }
}

impl IntoDimensions for HashMap<String, i32> {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        Ok(DimensionMap::from(self))
    }
}

impl<T: IntoDimensions> IntoDimensions for Option<T> {
    fn into_dimensions(self) -> Result<DimensionMap, UnitError> {
        match self {
            Some(spec) => spec.into_dimensions(),
            None => Ok(DimensionMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, i32)]) -> DimensionMap {
        DimensionMap::from_entries(entries.iter().map(|(k, v)| (*k, *v))).unwrap()
    }

    #[test]
    fn test_normalize_strips_zeros() {
        let m = DimensionMap::normalize(BTreeMap::from([
            ("m".to_string(), 0),
            ("s".to_string(), -1),
        ]));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("s"), -1);
        assert_eq!(m.get("m"), 0);
        assert!(DimensionMap::single("kg", 0).is_empty());
    }

    #[test]
    fn test_from_entries_accumulates() {
        let m = map(&[("m", 1), ("s", -1), ("m", 1), ("s", 1)]);
        assert_eq!(m, map(&[("m", 2)]));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = map(&[("kg", 1), ("m", 1), ("s", -2)]);
        let b = map(&[("s", -2), ("m", 1), ("kg", 1)]);
        assert_eq!(a, b);
        assert_ne!(a, map(&[("kg", 1), ("m", 1)]));
        assert_ne!(a, map(&[("kg", 1), ("m", 1), ("s", -1)]));
    }

    #[test]
    fn test_multiply() {
        let velocity = map(&[("m", 1), ("s", -1)]);
        let time = map(&[("s", 1)]);
        assert_eq!(velocity.multiply(&time).unwrap(), map(&[("m", 1)]));
    }

    #[test]
    fn test_divide() {
        let length = map(&[("m", 1)]);
        let time = map(&[("s", 1)]);
        assert_eq!(length.divide(&time).unwrap(), map(&[("m", 1), ("s", -1)]));
    }

    #[test]
    fn test_multiply_by_inverse_cancels() {
        let maps = [
            DimensionMap::new(),
            map(&[("m", 1)]),
            map(&[("kg", 1), ("m", 2), ("s", -3)]),
            map(&[("A", -7), ("cd", 4)]),
        ];
        for a in &maps {
            assert!(a.multiply(&a.scale(-1).unwrap()).unwrap().is_empty());
        }
    }

    #[test]
    fn test_scale() {
        let velocity = map(&[("m", 1), ("s", -1)]);
        assert_eq!(velocity.scale(2).unwrap(), map(&[("m", 2), ("s", -2)]));
        assert!(velocity.scale(0).unwrap().is_empty());
    }

    #[test]
    fn test_scale_overflow() {
        let big = map(&[("m", i32::MAX)]);
        assert!(matches!(big.scale(2), Err(UnitError::Arithmetic(_))));
        assert!(matches!(big.multiply(&map(&[("m", 1)])), Err(UnitError::Arithmetic(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(DimensionMap::new().to_string(), "");
        assert_eq!(map(&[("s", -2), ("m", 1), ("kg", 1)]).to_string(), "kg*m*s^-2");
    }

    #[test]
    fn test_dimensions_display_group_order() {
        let dims = Dimensions {
            physical: map(&[("s", -1), ("m", 1)]),
            algebraic: map(&[("i", 2)]),
            symbolic: map(&[("pi", 1)]),
        };
        assert_eq!(dims.to_string(), "m*s^-1*i^2*pi");
        assert_eq!(Dimensions::symbolic(map(&[("e", 1)])).to_string(), "e");
        assert_eq!(Dimensions::none().to_string(), "");
    }

    #[test]
    fn test_dimensions_namespaces_stay_apart() {
        let a = Dimensions::physical(map(&[("x", 1)]));
        let b = Dimensions::symbolic(map(&[("x", 1)]));
        assert_ne!(a, b);
        let product = a.multiply(&b).unwrap();
        assert_eq!(product.physical.get("x"), 1);
        assert_eq!(product.symbolic.get("x"), 1);
    }

    #[test]
    fn test_serde_normalizes() {
        let m: DimensionMap = serde_json::from_str(r#"{"m": 2, "s": 0}"#).unwrap();
        assert_eq!(m, map(&[("m", 2)]));
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"m":2}"#);
    }

    #[test]
    fn test_into_dimensions() {
        assert_eq!("m/s".into_dimensions().unwrap(), map(&[("m", 1), ("s", -1)]));
        assert_eq!(String::from("kg").into_dimensions().unwrap(), map(&[("kg", 1)]));
        assert!(None::<&str>.into_dimensions().unwrap().is_empty());
        assert_eq!(Some("s^2").into_dimensions().unwrap(), map(&[("s", 2)]));
        let prebuilt = map(&[("i", 1)]);
        assert_eq!((&prebuilt).into_dimensions().unwrap(), prebuilt);
        assert!("m^".into_dimensions().is_err());
    }

    #[test]
    fn test_from_hash_map() {
        let hm: HashMap<String, i32> = HashMap::from([("m".to_string(), 1), ("s".to_string(), 0)]);
        assert_eq!(DimensionMap::from(hm), map(&[("m", 1)]));
    }
}
