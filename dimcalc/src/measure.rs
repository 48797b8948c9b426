//! Measures: numbers tagged with a dimension and an optional uncertainty
//!
//! Multiplicative operations (`*`, `/`, powers) are always defined and combine
//! dimensions algebraically. Additive operations and comparisons require both
//! operands to share a dimension; they take [`Settings`] so the check can be
//! relaxed explicitly.

use crate::algebra::Exponent;
use crate::error::CalcError;
use crate::settings::{ComparisonPolicy, Settings};
use crate::{CalcResult, Dimension};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Neg};

/// A real value with optional standard deviation and a dimension
///
/// `stddev` is in the same units as `value`, never negative, and `None`
/// means exact. Every operation returns a new Measure.
#[derive(Debug, Clone)]
pub struct Measure {
    value: f64,
    stddev: Option<f64>,
    dim: Dimension,
}

impl Measure {
    /// An exact measure from a trusted constant
    ///
    /// Does not check `value`; use [`Measure::try_new`] for numbers that come
    /// from outside the program.
    pub fn new(value: f64, dim: Dimension) -> Self {
        Self {
            value,
            stddev: None,
            dim,
        }
    }

    /// An exact measure, rejecting NaN and infinities
    pub fn try_new(value: f64, dim: Dimension) -> CalcResult<Self> {
        finite("Value", value)?;
        Ok(Self::new(value, dim))
    }

    /// An exact dimensionless number
    pub fn number(value: f64) -> Self {
        Self::new(value, Dimension::dimensionless())
    }

    /// A measure with uncertainty
    pub fn with_stddev(value: f64, stddev: f64, dim: Dimension) -> CalcResult<Self> {
        finite("Value", value)?;
        finite("Standard deviation", stddev)?;
        if stddev < 0.0 {
            return Err(CalcError::Value(format!(
                "Standard deviation must be >= 0, got {}",
                stddev
            )));
        }
        Ok(Self {
            value,
            stddev: Some(stddev),
            dim,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn stddev(&self) -> Option<f64> {
        self.stddev
    }

    pub fn dim(&self) -> &Dimension {
        &self.dim
    }

    /// Relative uncertainty `stddev / value`
    ///
    /// `None` when the measure is exact or its value is zero.
    pub fn epsilon(&self) -> Option<f64> {
        match self.stddev {
            Some(s) if self.value != 0.0 => Some(s / self.value.abs()),
            _ => None,
        }
    }

    /// Same dimension, value and uncertainty multiplied by `factor`
    pub fn scale(&self, factor: f64) -> Measure {
        Measure {
            value: self.value * factor,
            stddev: self.stddev.map(|s| s * factor.abs()),
            dim: self.dim.clone(),
        }
    }

    pub fn recip(&self) -> Measure {
        self.powi(-1)
    }

    pub fn powi(&self, exp: i64) -> Measure {
        self.powr(Exponent::from_integer(exp))
    }

    /// Raise to a rational power
    ///
    /// Uncertainty is linearized to first order, `|value^n · ε · n|`, since
    /// the factors are fully correlated. When the value is zero the
    /// derivative form `|n · value^(n-1) · stddev|` is used instead; if that
    /// is not finite the result is reported as exact.
    pub fn powr(&self, exp: Exponent) -> Measure {
        let n = *exp.numer() as f64 / *exp.denom() as f64;
        let value = self.value.powf(n);
        let stddev = self.stddev.and_then(|s| {
            let propagated = match self.epsilon() {
                Some(eps) => (value * eps * n).abs(),
                None => (n * self.value.powf(n - 1.0) * s).abs(),
            };
            propagated.is_finite().then_some(propagated)
        });
        Measure {
            value,
            stddev,
            dim: self.dim.powr(exp),
        }
    }

    /// `self + other`; dimensions must match unless the settings allow it
    pub fn checked_add(&self, other: &Measure, settings: &Settings) -> CalcResult<Measure> {
        self.require_same_dim("addition", other, settings)?;
        Ok(Measure {
            value: self.value + other.value,
            stddev: quadrature(self.stddev, other.stddev),
            dim: self.dim.clone(),
        })
    }

    /// `self - other`; dimensions must match unless the settings allow it
    pub fn checked_sub(&self, other: &Measure, settings: &Settings) -> CalcResult<Measure> {
        self.checked_add(&-other, settings)
    }

    /// Add a bare number, which is only meaningful for dimensionless measures
    pub fn add_number(&self, number: f64, settings: &Settings) -> CalcResult<Measure> {
        self.checked_add(&Measure::number(number), settings)
    }

    /// Order two measures under the configured comparison policy
    ///
    /// Under [`ComparisonPolicy::Overlap`] measures whose one-sigma intervals
    /// overlap compare as equal.
    pub fn compare(&self, other: &Measure, settings: &Settings) -> CalcResult<Ordering> {
        self.require_same_dim("comparison", other, settings)?;
        if settings.comparison == ComparisonPolicy::Overlap && self.overlaps(other) {
            return Ok(Ordering::Equal);
        }
        self.value.partial_cmp(&other.value).ok_or_else(|| {
            CalcError::Value(format!(
                "Cannot order {} and {}",
                self.value, other.value
            ))
        })
    }

    /// Equality under the configured policy; false, never an error, when
    /// the dimensions differ
    pub fn equals(&self, other: &Measure, settings: &Settings) -> bool {
        if self.dim != other.dim {
            return false;
        }
        match settings.comparison {
            ComparisonPolicy::Exact => self.value == other.value,
            ComparisonPolicy::Overlap => self.overlaps(other),
        }
    }

    fn overlaps(&self, other: &Measure) -> bool {
        let spread = self.stddev.unwrap_or(0.0) + other.stddev.unwrap_or(0.0);
        (self.value - other.value).abs() <= spread
    }

    fn require_same_dim(
        &self,
        operation: &str,
        other: &Measure,
        settings: &Settings,
    ) -> CalcResult<()> {
        if self.dim == other.dim || settings.allow_dimension_mismatch {
            Ok(())
        } else {
            Err(CalcError::dimension_mismatch(
                operation, &self.dim, &other.dim,
            ))
        }
    }
}

fn finite(what: &str, number: f64) -> CalcResult<()> {
    if number.is_finite() {
        Ok(())
    } else {
        Err(CalcError::Type(format!(
            "{} must be a finite number, got {}",
            what, number
        )))
    }
}

fn quadrature(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0.0).hypot(b.unwrap_or(0.0))),
    }
}

/// Exact comparison of value and dimension; uncertainty is ignored
impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, &Settings::default())
    }
}

impl Mul for &Measure {
    type Output = Measure;

    /// Uncertainty combines in quadrature: `|ab|·sqrt(εa² + εb²)`, written
    /// as `sqrt((b·sa)² + (a·sb)²)` so a zero factor stays well defined.
    fn mul(self, rhs: &Measure) -> Measure {
        let stddev = match (self.stddev, rhs.stddev) {
            (None, None) => None,
            (sa, sb) => {
                Some((rhs.value * sa.unwrap_or(0.0)).hypot(self.value * sb.unwrap_or(0.0)))
            }
        };
        Measure {
            value: self.value * rhs.value,
            stddev,
            dim: &self.dim * &rhs.dim,
        }
    }
}

impl Div for &Measure {
    type Output = Measure;

    /// Uncertainty combines in quadrature: `|a/b|·sqrt(εa² + εb²)`
    fn div(self, rhs: &Measure) -> Measure {
        let stddev = match (self.stddev, rhs.stddev) {
            (None, None) => None,
            (sa, sb) => {
                let b = rhs.value;
                Some((sa.unwrap_or(0.0) / b).hypot(self.value * sb.unwrap_or(0.0) / (b * b)))
            }
        };
        Measure {
            value: self.value / rhs.value,
            stddev,
            dim: &self.dim / &rhs.dim,
        }
    }
}

impl Mul for Measure {
    type Output = Measure;

    fn mul(self, rhs: Measure) -> Measure {
        &self * &rhs
    }
}

impl Div for Measure {
    type Output = Measure;

    fn div(self, rhs: Measure) -> Measure {
        &self / &rhs
    }
}

impl Mul<f64> for &Measure {
    type Output = Measure;

    fn mul(self, rhs: f64) -> Measure {
        self.scale(rhs)
    }
}

impl Mul<f64> for Measure {
    type Output = Measure;

    fn mul(self, rhs: f64) -> Measure {
        self.scale(rhs)
    }
}

impl Mul<&Measure> for f64 {
    type Output = Measure;

    fn mul(self, rhs: &Measure) -> Measure {
        rhs.scale(self)
    }
}

impl Div<f64> for &Measure {
    type Output = Measure;

    fn div(self, rhs: f64) -> Measure {
        self.scale(1.0 / rhs)
    }
}

impl Neg for &Measure {
    type Output = Measure;

    fn neg(self) -> Measure {
        Measure {
            value: -self.value,
            stddev: self.stddev,
            dim: self.dim.clone(),
        }
    }
}

impl Neg for Measure {
    type Output = Measure;

    fn neg(self) -> Measure {
        -&self
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(stddev) = self.stddev {
            write!(f, " ± {}", stddev)?;
        }
        if !self.dim.is_dimensionless() {
            write!(f, " {}", self.dim)?;
        }
        Ok(())
    }
}
