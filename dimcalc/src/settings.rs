/// How two measures are compared for equality and ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonPolicy {
    /// Compare the central values exactly
    #[default]
    Exact,
    /// Two measures are equal when their `value ± stddev` intervals overlap
    Overlap,
}

/// Behaviour switches for measure arithmetic and catalogue resolution
///
/// All escape hatches are off by default. Turning one on relaxes a check
/// that otherwise mirrors physical law.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Allow `+`, `-` and comparisons between measures of unequal dimension.
    /// The result keeps the dimension of the left operand.
    pub allow_dimension_mismatch: bool,

    /// Equality and ordering policy
    pub comparison: ComparisonPolicy,

    /// Accept any known prefix in front of any known unit, ignoring the
    /// unit's own prefix set
    pub allow_any_prefix: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_dimension_mismatch: false,
            comparison: ComparisonPolicy::Exact,
            allow_any_prefix: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension_mismatch(mut self, allow: bool) -> Self {
        self.allow_dimension_mismatch = allow;
        self
    }

    pub fn with_comparison(mut self, policy: ComparisonPolicy) -> Self {
        self.comparison = policy;
        self
    }

    pub fn with_any_prefix(mut self, allow: bool) -> Self {
        self.allow_any_prefix = allow;
        self
    }
}
