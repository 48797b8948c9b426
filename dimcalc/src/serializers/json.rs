use super::dimension_pairs;
use crate::error::CalcError;
use crate::{CalcResult, Catalogue, Dimension, Unit};
use serde::Serialize;
use serde_json::Value;

/// `{names: [...], dimension: [[name, exponent], ...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionRecord {
    pub names: Vec<String>,
    pub dimension: Vec<(String, Value)>,
}

/// `{value, stddev?, dimension, names, symbols, prefixes?, info?}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRecord {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,
    pub dimension: Vec<(String, Value)>,
    pub names: Vec<String>,
    pub symbols: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

#[derive(Debug, Serialize)]
struct CatalogueRecord {
    dimensions: Vec<DimensionRecord>,
    units: Vec<UnitRecord>,
}

/// Export form of a dimension; names come from the catalogue's display
/// registry
pub fn dimension_record(catalogue: &Catalogue, dimension: &Dimension) -> DimensionRecord {
    DimensionRecord {
        names: catalogue.dimension_names(dimension).to_vec(),
        dimension: dimension_pairs(dimension, catalogue.registry()),
    }
}

pub fn unit_record(catalogue: &Catalogue, unit: &Unit) -> UnitRecord {
    UnitRecord {
        value: unit.value(),
        stddev: unit.measure().stddev(),
        dimension: dimension_pairs(unit.dim(), catalogue.registry()),
        names: unit.names().to_vec(),
        symbols: unit.symbols().to_vec(),
        prefixes: unit.prefixes().map(|set| set.name().to_string()),
        info: unit.info().map(str::to_string),
    }
}

impl Catalogue {
    /// Every named dimension and every registered unit as one JSON document
    pub fn to_json(&self) -> CalcResult<String> {
        let mut seen: Vec<&Dimension> = Vec::new();
        let mut dimensions = Vec::new();
        for (_, dimension) in self.dimensions() {
            if !seen.contains(&dimension) {
                seen.push(dimension);
                dimensions.push(dimension_record(self, dimension));
            }
        }
        let units = self
            .units()
            .into_iter()
            .map(|unit| unit_record(self, unit))
            .collect();

        serde_json::to_string_pretty(&CatalogueRecord { dimensions, units })
            .map_err(|e| CalcError::Value(format!("JSON serialization error: {}", e)))
    }
}
