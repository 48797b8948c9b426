mod json;

pub use json::{dimension_record, unit_record, DimensionRecord, UnitRecord};

use crate::algebra::Exponent;
use crate::{Dimension, DimensionRegistry};
use serde_json::Value;

/// An integer exponent as a JSON integer, anything else as `"p/q"`
pub(crate) fn exponent_value(exp: &Exponent) -> Value {
    if exp.is_integer() {
        Value::from(exp.to_integer())
    } else {
        Value::from(format!("{}/{}", exp.numer(), exp.denom()))
    }
}

/// `[[name, exponent], ...]` in registered display order
pub(crate) fn dimension_pairs(dimension: &Dimension, registry: &DimensionRegistry) -> Vec<(String, Value)> {
    let mut pairs: Vec<(&str, Exponent)> = dimension.iter().collect();
    pairs.sort_by_key(|(name, _)| {
        (
            registry.get(name).map(|b| b.order).unwrap_or(i32::MAX),
            name.to_string(),
        )
    });
    pairs
        .into_iter()
        .map(|(name, exp)| (name.to_string(), exponent_value(&exp)))
        .collect()
}
