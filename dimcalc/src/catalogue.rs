//! Name resolution over dimensions, units and prefix sets
//!
//! A [`Catalogue`] is built once by registering already constructed entries
//! and is read-mostly afterwards. Lookups try, in order: prefix sets,
//! dimensions, units (by any name or symbol), and finally prefix
//! decomposition (`kilometer` = `kilo` + `meter`).

use crate::error::CalcError;
use crate::prefix::{Prefix, PrefixSet};
use crate::settings::Settings;
use crate::unit::{Unit, UnitKind};
use crate::{CalcResult, Dimension, DimensionRegistry, Measure};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Anything a name can resolve to
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Dimension(Dimension),
    Unit(Unit),
    PrefixSet(PrefixSet),
}

impl Entry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entry::Dimension(_) => "dimension",
            Entry::Unit(_) => "unit",
            Entry::PrefixSet(_) => "prefix set",
        }
    }

    /// `self · other` for two dimensions or two units
    pub fn times(&self, other: &Entry) -> CalcResult<Entry> {
        match (self, other) {
            (Entry::Dimension(a), Entry::Dimension(b)) => Ok(Entry::Dimension(a * b)),
            (Entry::Unit(a), Entry::Unit(b)) => Ok(Entry::Unit(a.times(b)?)),
            _ => Err(self.unsupported("multiply", other)),
        }
    }

    /// `self / other` for two dimensions or two units
    pub fn per(&self, other: &Entry) -> CalcResult<Entry> {
        match (self, other) {
            (Entry::Dimension(a), Entry::Dimension(b)) => Ok(Entry::Dimension(a / b)),
            (Entry::Unit(a), Entry::Unit(b)) => Ok(Entry::Unit(a.per(b)?)),
            _ => Err(self.unsupported("divide", other)),
        }
    }

    pub fn into_unit(self) -> CalcResult<Unit> {
        match self {
            Entry::Unit(unit) => Ok(unit),
            other => Err(CalcError::Type(format!(
                "Expected a unit, found a {}",
                other.kind_name()
            ))),
        }
    }

    fn unsupported(&self, operation: &str, other: &Entry) -> CalcError {
        CalcError::Type(format!(
            "Cannot {} a {} by a {}",
            operation,
            self.kind_name(),
            other.kind_name()
        ))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Dimension(d) => write!(f, "{}", d),
            Entry::Unit(u) => write!(f, "{}", u),
            Entry::PrefixSet(p) => write!(f, "{}", p),
        }
    }
}

/// Registry of named dimensions, units and prefix sets
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    registry: DimensionRegistry,
    settings: Settings,
    prefix_sets: HashMap<String, PrefixSet>,
    dimensions: HashMap<String, Dimension>,
    dimension_names: HashMap<Dimension, Vec<String>>,
    units: HashMap<String, Unit>,
    units_by_dimension: HashMap<Dimension, Vec<Unit>>,
    /// Prefix and symbol strings in registration order
    prefixes: Vec<(String, Prefix)>,
}

impl Catalogue {
    pub fn new(registry: DimensionRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn registry(&self) -> &DimensionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DimensionRegistry {
        &mut self.registry
    }

    /// Index `entry` under `name`, and units also under all their names
    /// and symbols
    ///
    /// Dimensions and units must be built from base dimensions known to
    /// this catalogue's registry.
    pub fn register(&mut self, name: &str, entry: Entry) -> CalcResult<()> {
        match entry {
            Entry::Unit(unit) => {
                self.check_bases(unit.dim())?;
                self.register_unit(name, unit);
            }
            Entry::Dimension(dimension) => {
                self.check_bases(&dimension)?;
                self.register_dimension(name, dimension);
            }
            Entry::PrefixSet(set) => self.register_prefix_set(name, set),
        }
        Ok(())
    }

    /// Register a whole namespace of entries
    pub fn register_all<'a>(
        &mut self,
        entries: impl IntoIterator<Item = (&'a str, Entry)>,
    ) -> CalcResult<()> {
        for (name, entry) in entries {
            self.register(name, entry)?;
        }
        Ok(())
    }

    fn check_bases(&self, dimension: &Dimension) -> CalcResult<()> {
        match dimension
            .iter()
            .find(|(name, _)| !self.registry.contains(name))
        {
            Some((name, _)) => Err(CalcError::unknown_dimension(name)),
            None => Ok(()),
        }
    }

    fn register_unit(&mut self, name: &str, unit: Unit) {
        debug!(name, kind = unit.kind().name(), "registering unit");
        let keys: Vec<String> = std::iter::once(name.to_string())
            .chain(unit.aliases().map(str::to_string))
            .filter(|key| !key.is_empty())
            .collect();
        for key in keys {
            if let Some(previous) = self.units.insert(key.clone(), unit.clone()) {
                if previous != unit {
                    debug!(key = %key, previous = previous.name(), "unit name rebound");
                }
            }
        }

        let same_dim = self
            .units_by_dimension
            .entry(unit.dim().clone())
            .or_default();
        if !same_dim.contains(&unit) {
            same_dim.push(unit);
        }
    }

    fn register_dimension(&mut self, name: &str, dimension: Dimension) {
        debug!(name, dimension = %dimension, "registering dimension");
        let names = self
            .dimension_names
            .entry(dimension.clone())
            .or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        self.dimensions.insert(name.to_string(), dimension);
    }

    fn register_prefix_set(&mut self, name: &str, set: PrefixSet) {
        debug!(name, size = set.len(), "registering prefix set");
        for prefix in set.prefixes() {
            for key in [prefix.prefix(), prefix.symbol()] {
                if key.is_empty() {
                    continue;
                }
                match self.prefixes.iter_mut().find(|(k, _)| k == key) {
                    Some(slot) => slot.1 = prefix.clone(),
                    None => self.prefixes.push((key.to_string(), prefix.clone())),
                }
            }
        }
        self.prefix_sets.insert(name.to_string(), set);
    }

    /// Resolve a name: prefix set, then dimension, then unit, then
    /// prefix decomposition
    pub fn get(&self, name: &str) -> CalcResult<Entry> {
        if let Some(set) = self.prefix_sets.get(name) {
            return Ok(Entry::PrefixSet(set.clone()));
        }
        if let Some(dimension) = self.dimensions.get(name) {
            return Ok(Entry::Dimension(dimension.clone()));
        }
        if let Some(unit) = self.units.get(name) {
            return Ok(Entry::Unit(unit.clone()));
        }
        match self.decompose(name) {
            Some(unit) => Ok(Entry::Unit(unit)),
            None => Err(CalcError::unknown_unit(name)),
        }
    }

    /// Resolve a name that must be a unit
    pub fn unit(&self, name: &str) -> CalcResult<Unit> {
        self.get(name)?.into_unit()
    }

    /// Resolve a name that must be a dimension
    pub fn dimension(&self, name: &str) -> CalcResult<Dimension> {
        match self.get(name)? {
            Entry::Dimension(dimension) => Ok(dimension),
            other => Err(CalcError::Type(format!(
                "'{}' is a {}, not a dimension",
                name,
                other.kind_name()
            ))),
        }
    }

    /// Strip each known prefix string from the front of `name`, in
    /// registration order, and accept the first remainder that is a unit
    /// allowing that prefix
    fn decompose(&self, name: &str) -> Option<Unit> {
        for (key, prefix) in &self.prefixes {
            let Some(rest) = name.strip_prefix(key.as_str()) else {
                continue;
            };
            let Some(unit) = self.units.get(rest) else {
                trace!(name, prefix = %key, rest, "remainder is not a unit");
                continue;
            };
            if !unit.accepts(prefix) && !self.settings.allow_any_prefix {
                trace!(name, prefix = %key, unit = unit.name(), "prefix not allowed");
                continue;
            }
            match Unit::prefixed(prefix, unit) {
                Ok(prefixed) => {
                    debug!(name, prefix = %key, unit = unit.name(), "resolved by prefix");
                    return Some(prefixed);
                }
                Err(err) => trace!(name, error = %err, "prefix rejected"),
            }
        }
        None
    }

    /// Every unit sharing `dimension`, in registration order
    pub fn units_for(&self, dimension: &Dimension) -> &[Unit] {
        self.units_by_dimension
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names registered for `dimension` (`velocity`, `speed`, ...)
    pub fn dimension_names(&self, dimension: &Dimension) -> &[String] {
        self.dimension_names
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every distinct registered unit
    pub fn units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units_by_dimension.values().flatten().collect();
        units.sort_by(|a, b| a.name().cmp(b.name()));
        units
    }

    /// Every named dimension, by name
    pub fn dimensions(&self) -> Vec<(&str, &Dimension)> {
        let mut dimensions: Vec<(&str, &Dimension)> = self
            .dimensions
            .iter()
            .map(|(name, dim)| (name.as_str(), dim))
            .collect();
        dimensions.sort_by(|a, b| a.0.cmp(b.0));
        dimensions
    }

    pub fn prefix_sets(&self) -> Vec<&PrefixSet> {
        let mut sets: Vec<&PrefixSet> = self.prefix_sets.values().collect();
        sets.sort_by(|a, b| a.name().cmp(b.name()));
        sets
    }

    /// Materialize every unit × allowed prefix combination
    ///
    /// This is a combinatorial expansion and is only computed on request.
    pub fn all_prefixed_units(&self) -> Vec<Unit> {
        let mut expanded = Vec::new();
        for unit in self.units() {
            let Some(set) = unit.prefixes() else {
                continue;
            };
            for prefix in set.prefixes() {
                if let Ok(prefixed) = Unit::prefixed(prefix, unit) {
                    expanded.push(prefixed);
                }
            }
        }
        debug!(count = expanded.len(), "expanded prefixed units");
        expanded
    }

    /// The linear unit of the measure's dimension whose amount is closest
    /// to 1 on a log scale
    pub fn best_unit(&self, measure: &Measure) -> Option<&Unit> {
        let candidates = self
            .units_for(measure.dim())
            .iter()
            .filter(|u| matches!(u.kind(), UnitKind::Linear | UnitKind::Prefixed { .. }));
        if measure.value() == 0.0 {
            return candidates.into_iter().next();
        }
        candidates.min_by(|a, b| {
            let distance = |u: &Unit| (measure.value() / u.value()).abs().log10().abs();
            distance(a).total_cmp(&distance(b))
        })
    }

    /// Human-readable rendering, in the best unit when one is known and in
    /// fundamental dimensions otherwise
    pub fn format_measure(&self, measure: &Measure) -> String {
        let Some(unit) = self.best_unit(measure) else {
            return self.format_fundamental(measure);
        };
        let scaled = measure.scale(1.0 / unit.value());
        match scaled.stddev() {
            Some(stddev) => format!("{} ± {} {}", scaled.value(), stddev, unit.symbol()),
            None => format!("{} {}", scaled.value(), unit.symbol()),
        }
    }

    fn format_fundamental(&self, measure: &Measure) -> String {
        let mut out = measure.value().to_string();
        if let Some(stddev) = measure.stddev() {
            out.push_str(&format!(" ± {}", stddev));
        }
        if !measure.dim().is_dimensionless() {
            out.push(' ');
            out.push_str(&self.registry.format(measure.dim()));
        }
        out
    }
}
