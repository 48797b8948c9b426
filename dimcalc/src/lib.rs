//! # dimcalc
//!
//! **Quantities that know what they measure**
//!
//! dimcalc represents physical quantities as numbers paired with a symbolic
//! dimension, an optional uncertainty, and a catalogue of named units and
//! prefixes to build, convert and display them.
//!
//! ## Quick Start
//!
//! ```rust
//! use dimcalc::{standard, CalcResult, Settings};
//!
//! fn main() -> CalcResult<()> {
//!     let catalogue = standard::si()?;
//!
//!     // Prefixed names resolve through the unit's prefix set
//!     let km = catalogue.unit("kilometer")?;
//!     let hour = catalogue.unit("hour")?;
//!
//!     let distance = km.quantity(42.0);
//!     let duration = hour.quantity(3.5);
//!     let speed = &distance / &duration;
//!
//!     // Adding unlike quantities is a dimension error
//!     assert!(distance.checked_add(&duration, &Settings::default()).is_err());
//!
//!     println!("{}", catalogue.format_measure(&speed));
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Dimensions
//! Products of registered base dimensions with exact rational exponents.
//! Multiplication and division always succeed.
//!
//! ### Measures
//! A value, an optional standard deviation and a dimension. Uncertainty is
//! propagated in quadrature; only like dimensions can be added or compared.
//!
//! ### Units and prefixes
//! Named measures (`meter`), possibly affine (`celsius`), logarithmic
//! (`decibel`), chained for display (`ft & in`) or prefixed (`km`).
//!
//! ### Catalogue
//! Resolves names and symbols to dimensions, units and prefix sets, falling
//! back to stripping a known prefix from the front of the name.

pub mod algebra;
pub mod catalogue;
pub mod dimension;
pub mod error;
pub mod measure;
pub mod prefix;
pub mod serializers;
pub mod settings;
pub mod standard;
pub mod unit;

pub use algebra::{Exponent, Product};
pub use catalogue::{Catalogue, Entry};
pub use dimension::{BaseDimension, Dimension, DimensionRegistry};
pub use error::CalcError;
pub use measure::Measure;
pub use prefix::{Prefix, PrefixSet};
pub use serializers::{DimensionRecord, UnitRecord};
pub use settings::{ComparisonPolicy, Settings};
pub use unit::{Unit, UnitKind};

/// Result type for dimcalc operations
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests;
