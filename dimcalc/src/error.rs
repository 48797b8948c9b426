use thiserror::Error;

/// Error types for dimension algebra, measure arithmetic and catalogue lookups
///
/// Every error is raised at the point of violation. Nothing is deferred or
/// silently coerced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Unknown base dimension, dimension mismatch in an additive operation,
    /// or an affine zero point of the wrong dimension
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// Attempt to chain or compose a unit kind that is not linear
    #[error("Incompatible unit: {0}")]
    IncompatibleUnit(String),

    /// Catalogue lookup failed by every route, including prefix decomposition
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Numeric argument outside the allowed domain
    #[error("Invalid value: {0}")]
    Value(String),

    /// Operand of a kind the operation does not accept
    #[error("Type error: {0}")]
    Type(String),
}

impl CalcError {
    pub fn dimension_mismatch(
        operation: &str,
        left: impl std::fmt::Display,
        right: impl std::fmt::Display,
    ) -> Self {
        CalcError::Dimension(format!(
            "Cannot apply {} to quantities of dimension '{}' and '{}'",
            operation, left, right
        ))
    }

    pub fn unknown_dimension(name: &str) -> Self {
        CalcError::Dimension(format!("Unknown base dimension: '{}'", name))
    }

    pub fn unknown_unit(name: &str) -> Self {
        CalcError::UnknownUnit(format!("No unit found for '{}'", name))
    }
}
