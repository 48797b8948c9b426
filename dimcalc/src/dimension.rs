//! Dimension algebra
//!
//! A [`Dimension`] is a point in the free abelian group generated by named
//! base dimensions, with exact rational coordinates: `length`, `length/time`,
//! `length^(1/2)`. Base names are introduced through a [`DimensionRegistry`];
//! a name the registry has never seen cannot appear in a Dimension.

use crate::algebra::{format_spaced, Exponent, Product};
use crate::error::CalcError;
use crate::CalcResult;
use num_traits::One;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Div, Mul};
use tracing::debug;

/// A product of base dimensions raised to rational exponents
///
/// Immutable value type: equality and hashing are structural over the
/// exponent map, so it can key a `HashMap`. The empty product is
/// dimensionless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dimension {
    product: Product<String>,
}

impl Dimension {
    /// The dimension of pure numbers
    pub fn dimensionless() -> Self {
        Self::default()
    }

    pub(crate) fn from_product(product: Product<String>) -> Self {
        Self { product }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.product.is_identity()
    }

    /// True iff exactly one base name is present, with exponent exactly 1
    pub fn is_base_dimension(&self) -> bool {
        self.product.single().is_some()
    }

    /// The base name when this is a base dimension
    pub fn base_name(&self) -> Option<&str> {
        self.product.single().map(String::as_str)
    }

    /// Exponent of `name`, zero when absent
    pub fn exponent(&self, name: &str) -> Exponent {
        self.product.exponent(&name.to_string())
    }

    /// `(name, exponent)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Exponent)> {
        self.product.iter().map(|(name, exp)| (name.as_str(), *exp))
    }

    pub fn powr(&self, exp: Exponent) -> Self {
        Self::from_product(self.product.powr(exp))
    }

    pub fn powi(&self, exp: i64) -> Self {
        self.powr(Exponent::from_integer(exp))
    }

    pub fn recip(&self) -> Self {
        Self::from_product(self.product.recip())
    }
}

impl Mul for &Dimension {
    type Output = Dimension;

    fn mul(self, rhs: &Dimension) -> Dimension {
        Dimension::from_product(self.product.product(&rhs.product))
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        &self * &rhs
    }
}

impl Div for &Dimension {
    type Output = Dimension;

    fn div(self, rhs: &Dimension) -> Dimension {
        Dimension::from_product(self.product.quotient(&rhs.product))
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        &self / &rhs
    }
}

/// Renders with full base names: `length time^-2`. Use
/// [`DimensionRegistry::format`] for the registered symbol order.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.product.ordered_by(|name| name.clone());
        write!(f, "{}", format_spaced(&terms, |name| name.clone()))
    }
}

/// Metadata for one registered base dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDimension {
    pub name: String,
    pub symbol: String,
    /// Display priority, ascending
    pub order: i32,
}

/// The set of known base dimensions
///
/// Passed explicitly wherever Dimensions are built from names, so separate
/// catalogues (and separate tests) never share base dimensions by accident.
#[derive(Debug, Clone, Default)]
pub struct DimensionRegistry {
    bases: HashMap<String, BaseDimension>,
}

impl DimensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a base dimension and return the Dimension `name^1`
    ///
    /// Registering an existing name again replaces its symbol and display
    /// order. The Dimension values themselves are unaffected since identity
    /// is by name only.
    pub fn new_base(&mut self, name: &str, symbol: &str, order: i32) -> Dimension {
        let base = BaseDimension {
            name: name.to_string(),
            symbol: symbol.to_string(),
            order,
        };
        if let Some(previous) = self.bases.insert(name.to_string(), base) {
            debug!(
                name,
                previous_order = previous.order,
                order,
                "re-registered base dimension"
            );
        } else {
            debug!(name, symbol, order, "registered base dimension");
        }
        Dimension::from_product(Product::term(name.to_string()))
    }

    /// The Dimension `name^1` for an already registered base
    pub fn base(&self, name: &str) -> CalcResult<Dimension> {
        self.dimension([(name, Exponent::one())])
    }

    /// Build a Dimension from `(base name, exponent)` pairs
    ///
    /// Fails immediately on the first unregistered name.
    pub fn dimension<'a>(
        &self,
        pairs: impl IntoIterator<Item = (&'a str, Exponent)>,
    ) -> CalcResult<Dimension> {
        let mut checked = Vec::new();
        for (name, exp) in pairs {
            if !self.bases.contains_key(name) {
                return Err(CalcError::unknown_dimension(name));
            }
            checked.push((name.to_string(), exp));
        }
        Ok(Dimension::from_product(Product::from_terms(checked)))
    }

    pub fn get(&self, name: &str) -> Option<&BaseDimension> {
        self.bases.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bases.contains_key(name)
    }

    /// Registered bases in display order
    pub fn bases(&self) -> Vec<&BaseDimension> {
        let mut bases: Vec<&BaseDimension> = self.bases.values().collect();
        bases.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        bases
    }

    /// Render in fundamental symbols: `M L^2 T^-2`
    ///
    /// Positive exponents come before negative ones; within each group the
    /// registered order decides. Names the registry does not know fall back
    /// to their full name, sorted last.
    pub fn format(&self, dimension: &Dimension) -> String {
        let terms = dimension.product.ordered_by(|name| {
            let order = self.bases.get(name).map(|b| b.order).unwrap_or(i32::MAX);
            (order, name.clone())
        });
        format_spaced(&terms, |name| {
            self.bases
                .get(name)
                .map(|b| b.symbol.clone())
                .unwrap_or_else(|| name.clone())
        })
    }
}
