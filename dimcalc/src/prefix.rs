//! Prefixes (`kilo`, `k`, ×1000) and the named sets units declare
//! themselves compatible with

use crate::error::CalcError;
use crate::CalcResult;
use std::fmt;
use std::ops::BitOr;

/// A named multiplicative scale factor
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    prefix: String,
    symbol: String,
    value: f64,
}

impl Prefix {
    /// Fails unless `value` is a finite number greater than zero
    pub fn new(prefix: &str, symbol: &str, value: f64) -> CalcResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::Value(format!(
                "Prefix '{}' must have a positive value, got {}",
                prefix, value
            )));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            symbol: symbol.to_string(),
            value,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) = {}", self.prefix, self.symbol, self.value)
    }
}

/// A named, immutable collection of prefixes
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixSet {
    name: String,
    prefixes: Vec<Prefix>,
}

impl PrefixSet {
    pub fn new(name: &str, prefixes: Vec<Prefix>) -> Self {
        Self {
            name: name.to_string(),
            prefixes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }

    pub fn contains(&self, prefix: &Prefix) -> bool {
        self.prefixes.contains(prefix)
    }

    /// Find a member by its prefix string or its symbol
    pub fn get(&self, name: &str) -> Option<&Prefix> {
        self.prefixes
            .iter()
            .find(|p| p.prefix == name || p.symbol == name)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// A new set holding the members of both, named `self|other`
    pub fn union(&self, other: &PrefixSet) -> PrefixSet {
        let mut prefixes = self.prefixes.clone();
        for prefix in &other.prefixes {
            if !prefixes.contains(prefix) {
                prefixes.push(prefix.clone());
            }
        }
        PrefixSet {
            name: format!("{}|{}", self.name, other.name),
            prefixes,
        }
    }

    /// Same members under a new name
    pub fn renamed(&self, name: &str) -> PrefixSet {
        PrefixSet {
            name: name.to_string(),
            prefixes: self.prefixes.clone(),
        }
    }
}

impl BitOr for &PrefixSet {
    type Output = PrefixSet;

    fn bitor(self, rhs: &PrefixSet) -> PrefixSet {
        self.union(rhs)
    }
}

impl fmt::Display for PrefixSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.prefixes.iter().map(|p| p.symbol()).collect();
        write!(f, "{} [{}]", self.name, symbols.join(", "))
    }
}
