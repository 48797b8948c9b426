//! Named units
//!
//! A [`Unit`] is a [`Measure`] with names, symbols and the prefixes it may
//! combine with: `kilometer` is `1000` of dimension `length`. The
//! [`UnitKind`] decides how amounts map onto measures:
//! - Linear: `x unit = x · value`
//! - Affine: `x unit = zero_point + x · value` (celsius)
//! - Logarithmic: `x unit = reference · 10^(x / units_per_ten)` (decibel)
//! - Chained: mixed-radix display over units of one dimension (`ft & in`)
//! - Prefixed: a prefix applied to a base unit (`km`)
//! - Composite: a product of units (`km/h`)

use crate::algebra::{Exponent, Product};
use crate::error::CalcError;
use crate::prefix::{Prefix, PrefixSet};
use crate::{CalcResult, Dimension, Measure};
use std::fmt;
use std::ops::BitAnd;

/// How a unit relates amounts to measures
#[derive(Debug, Clone, PartialEq)]
pub enum UnitKind {
    Linear,
    Affine {
        zero_point: Measure,
    },
    Logarithmic {
        reference: Box<Unit>,
        units_per_ten: f64,
    },
    /// Members sorted largest to smallest
    Chained {
        units: Vec<Unit>,
    },
    Prefixed {
        prefix: Prefix,
        base: Box<Unit>,
    },
    Composite {
        names: Product<String>,
        symbols: Product<String>,
    },
}

impl UnitKind {
    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Linear => "linear",
            UnitKind::Affine { .. } => "affine",
            UnitKind::Logarithmic { .. } => "logarithmic",
            UnitKind::Chained { .. } => "chained",
            UnitKind::Prefixed { .. } => "prefixed",
            UnitKind::Composite { .. } => "composite",
        }
    }
}

/// A measure with a name
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    measure: Measure,
    names: Vec<String>,
    symbols: Vec<String>,
    prefixes: Option<PrefixSet>,
    info: Option<String>,
    kind: UnitKind,
}

fn owned(strings: &[&str]) -> Vec<String> {
    strings.iter().map(|s| s.to_string()).collect()
}

impl Unit {
    /// A linear unit; the first name and symbol are canonical
    pub fn new(names: &[&str], symbols: &[&str], measure: Measure) -> Self {
        Self {
            measure,
            names: owned(names),
            symbols: owned(symbols),
            prefixes: None,
            info: None,
            kind: UnitKind::Linear,
        }
    }

    /// An affine unit: `x` of it is `zero_point + x · step`
    pub fn affine(
        names: &[&str],
        symbols: &[&str],
        step: Measure,
        zero_point: Measure,
    ) -> CalcResult<Self> {
        if step.dim() != zero_point.dim() {
            return Err(CalcError::Dimension(format!(
                "Zero point of '{}' has dimension '{}', expected '{}'",
                names.first().copied().unwrap_or("?"),
                zero_point.dim(),
                step.dim()
            )));
        }
        let mut unit = Self::new(names, symbols, step);
        unit.kind = UnitKind::Affine { zero_point };
        Ok(unit)
    }

    /// A logarithmic unit: `x` of it is `reference · 10^(x / units_per_ten)`
    pub fn logarithmic(
        names: &[&str],
        symbols: &[&str],
        reference: Unit,
        units_per_ten: f64,
    ) -> CalcResult<Self> {
        if !units_per_ten.is_finite() || units_per_ten <= 0.0 {
            return Err(CalcError::Value(format!(
                "Logarithmic scale must be positive, got {}",
                units_per_ten
            )));
        }
        let mut unit = Self::new(names, symbols, reference.measure.clone());
        unit.kind = UnitKind::Logarithmic {
            reference: Box::new(reference),
            units_per_ten,
        };
        Ok(unit)
    }

    /// A mixed-radix grouping of same-dimension units, largest first
    ///
    /// Nested chains are flattened. Affine and logarithmic members are
    /// rejected.
    pub fn chained(units: Vec<Unit>) -> CalcResult<Self> {
        let mut members = Vec::new();
        for unit in units {
            if matches!(
                unit.kind,
                UnitKind::Affine { .. } | UnitKind::Logarithmic { .. }
            ) {
                return Err(CalcError::IncompatibleUnit(format!(
                    "Cannot chain {} unit '{}'",
                    unit.kind.name(),
                    unit.name()
                )));
            }
            match unit.kind {
                UnitKind::Chained { units: inner } => members.extend(inner),
                kind => members.push(Unit { kind, ..unit }),
            }
        }

        let first = members
            .first()
            .ok_or_else(|| CalcError::Value("Cannot chain an empty list of units".to_string()))?;
        let dim = first.dim().clone();
        if let Some(odd) = members.iter().find(|u| u.dim() != &dim) {
            return Err(CalcError::dimension_mismatch(
                &format!("chaining of '{}'", odd.name()),
                &dim,
                odd.dim(),
            ));
        }

        members.sort_by(|a, b| b.value().total_cmp(&a.value()));
        let names: Vec<&str> = members.iter().map(|u| u.name()).collect();
        let symbols: Vec<&str> = members.iter().map(|u| u.symbol()).collect();
        let mut unit = Self::new(
            &[names.join(" & ").as_str()],
            &[symbols.join(" & ").as_str()],
            members[0].measure.clone(),
        );
        unit.kind = UnitKind::Chained { units: members };
        Ok(unit)
    }

    /// `self & other`
    pub fn chain(&self, other: &Unit) -> CalcResult<Unit> {
        Self::chained(vec![self.clone(), other.clone()])
    }

    /// `prefix` applied to `base`: value `prefix.value · base.value`,
    /// names and symbols concatenated
    pub fn prefixed(prefix: &Prefix, base: &Unit) -> CalcResult<Unit> {
        base.require_linear("prefix")?;
        let names: Vec<String> = base
            .names
            .iter()
            .map(|n| format!("{}{}", prefix.prefix(), n))
            .collect();
        let symbols: Vec<String> = base
            .symbols
            .iter()
            .map(|s| format!("{}{}", prefix.symbol(), s))
            .collect();
        Ok(Unit {
            measure: base.measure.scale(prefix.value()),
            names,
            symbols,
            prefixes: None,
            info: None,
            kind: UnitKind::Prefixed {
                prefix: prefix.clone(),
                base: Box::new(base.clone()),
            },
        })
    }

    /// Composite `self · other`
    pub fn times(&self, other: &Unit) -> CalcResult<Unit> {
        self.require_linear("multiplication")?;
        other.require_linear("multiplication")?;
        Ok(Self::composite(
            self.symbol_product().product(&other.symbol_product()),
            self.name_product().product(&other.name_product()),
            &self.measure * &other.measure,
        ))
    }

    /// Composite `self / other`
    pub fn per(&self, other: &Unit) -> CalcResult<Unit> {
        self.require_linear("division")?;
        other.require_linear("division")?;
        Ok(Self::composite(
            self.symbol_product().quotient(&other.symbol_product()),
            self.name_product().quotient(&other.name_product()),
            &self.measure / &other.measure,
        ))
    }

    /// Composite `self^exp`
    pub fn powr(&self, exp: Exponent) -> CalcResult<Unit> {
        self.require_linear("exponentiation")?;
        Ok(Self::composite(
            self.symbol_product().powr(exp),
            self.name_product().powr(exp),
            self.measure.powr(exp),
        ))
    }

    fn composite(symbols: Product<String>, names: Product<String>, measure: Measure) -> Unit {
        Unit {
            measure,
            names: vec![names.to_string()],
            symbols: vec![symbols.to_string()],
            prefixes: None,
            info: None,
            kind: UnitKind::Composite { names, symbols },
        }
    }

    fn symbol_product(&self) -> Product<String> {
        match &self.kind {
            UnitKind::Composite { symbols, .. } => symbols.clone(),
            _ => Product::term(self.symbol().to_string()),
        }
    }

    fn name_product(&self) -> Product<String> {
        match &self.kind {
            UnitKind::Composite { names, .. } => names.clone(),
            _ => Product::term(self.name().to_string()),
        }
    }

    fn require_linear(&self, operation: &str) -> CalcResult<()> {
        if self.is_linear() {
            return Ok(());
        }
        Err(CalcError::IncompatibleUnit(format!(
            "Cannot apply {} to {} unit '{}'",
            operation,
            self.kind.name(),
            self.name()
        )))
    }

    pub fn with_prefixes(mut self, prefixes: PrefixSet) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    pub fn with_info(mut self, info: &str) -> Self {
        self.info = Some(info.to_string());
        self
    }

    pub fn measure(&self) -> &Measure {
        &self.measure
    }

    pub fn value(&self) -> f64 {
        self.measure.value()
    }

    pub fn dim(&self) -> &Dimension {
        self.measure.dim()
    }

    /// Canonical name, falling back to the canonical symbol
    pub fn name(&self) -> &str {
        self.names
            .first()
            .or_else(|| self.symbols.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Canonical symbol, falling back to the canonical name
    pub fn symbol(&self) -> &str {
        self.symbols
            .first()
            .or_else(|| self.names.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Every string this unit answers to, names first
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .chain(self.symbols.iter())
            .map(String::as_str)
    }

    pub fn prefixes(&self) -> Option<&PrefixSet> {
        self.prefixes.as_ref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    /// False for affine, logarithmic and chained units
    pub fn is_linear(&self) -> bool {
        !matches!(
            self.kind,
            UnitKind::Affine { .. } | UnitKind::Logarithmic { .. } | UnitKind::Chained { .. }
        )
    }

    /// Whether `prefix` belongs to this unit's prefix set
    pub fn accepts(&self, prefix: &Prefix) -> bool {
        self.prefixes.as_ref().is_some_and(|set| set.contains(prefix))
    }

    /// `amount` of this unit as a measure
    pub fn quantity(&self, amount: f64) -> Measure {
        match &self.kind {
            UnitKind::Affine { zero_point } => Measure::new(
                zero_point.value() + amount * self.value(),
                self.dim().clone(),
            ),
            UnitKind::Logarithmic {
                reference,
                units_per_ten,
            } => reference.measure.scale(10f64.powf(amount / units_per_ten)),
            _ => self.measure.scale(amount),
        }
    }

    /// A possibly uncertain dimensionless `amount` of this unit as a measure
    pub fn of(&self, amount: &Measure) -> CalcResult<Measure> {
        if !amount.dim().is_dimensionless() {
            return Err(CalcError::Type(format!(
                "Amount of '{}' must be a plain number, got dimension '{}'",
                self.name(),
                amount.dim()
            )));
        }
        let exact = self.quantity(amount.value());
        let Some(stddev) = amount.stddev() else {
            return Ok(exact);
        };
        // d(quantity)/d(amount), to first order
        let slope = match &self.kind {
            UnitKind::Logarithmic { units_per_ten, .. } => {
                exact.value() * std::f64::consts::LN_10 / units_per_ten
            }
            _ => self.value(),
        };
        Measure::with_stddev(exact.value(), (slope * stddev).abs(), exact.dim().clone())
    }

    /// How many of this unit `measure` is
    ///
    /// Fails on a dimension mismatch, and for logarithmic units when the
    /// measure is not strictly positive.
    pub fn magnitude_of(&self, measure: &Measure) -> CalcResult<f64> {
        if measure.dim() != self.dim() {
            return Err(CalcError::dimension_mismatch(
                &format!("conversion to '{}'", self.name()),
                measure.dim(),
                self.dim(),
            ));
        }
        match &self.kind {
            UnitKind::Affine { zero_point } => {
                Ok((measure.value() - zero_point.value()) / self.value())
            }
            UnitKind::Logarithmic {
                reference,
                units_per_ten,
            } => {
                let ratio = measure.value() / reference.value();
                if ratio <= 0.0 || ratio.is_nan() {
                    return Err(CalcError::Value(format!(
                        "Logarithmic unit '{}' needs a positive measure, got {}",
                        self.name(),
                        measure.value()
                    )));
                }
                Ok(units_per_ten * ratio.log10())
            }
            _ => Ok(measure.value() / self.value()),
        }
    }

    /// Break `measure` into `(amount, symbol)` chunks
    ///
    /// Chained units floor-divide by each member, largest first, skipping
    /// zero chunks; the smallest member takes the exact remainder and is
    /// always emitted. Any other unit yields a single chunk.
    pub fn render(&self, measure: &Measure) -> CalcResult<Vec<(f64, String)>> {
        let UnitKind::Chained { units } = &self.kind else {
            return Ok(vec![(self.magnitude_of(measure)?, self.symbol().to_string())]);
        };
        if measure.dim() != self.dim() {
            return Err(CalcError::dimension_mismatch(
                &format!("conversion to '{}'", self.name()),
                measure.dim(),
                self.dim(),
            ));
        }

        let mut chunks = Vec::new();
        let mut remaining = measure.value();
        let Some((last, leading)) = units.split_last() else {
            return Ok(chunks);
        };
        for unit in leading {
            let (whole, rest) = floor_divmod(remaining, unit.value());
            remaining = rest;
            if whole != 0.0 {
                chunks.push((whole, unit.symbol().to_string()));
            }
        }
        chunks.push((remaining / last.value(), last.symbol().to_string()));
        Ok(chunks)
    }

    /// `measure` written in this unit: `3 ft + 3.37 in`
    pub fn format(&self, measure: &Measure) -> CalcResult<String> {
        let chunks = self.render(measure)?;
        Ok(chunks
            .iter()
            .map(|(amount, symbol)| format!("{} {}", amount, symbol))
            .collect::<Vec<_>>()
            .join(" + "))
    }
}

/// Floored division whose parts always add back up: `q * divisor + r == value`
///
/// `r` takes the sign of `divisor`. The quotient is derived from the
/// remainder, so a quotient that rounds up past the true floor cannot happen.
fn floor_divmod(value: f64, divisor: f64) -> (f64, f64) {
    let mut rem = value % divisor;
    let mut div = (value - rem) / divisor;
    if rem != 0.0 && (divisor < 0.0) != (rem < 0.0) {
        rem += divisor;
        div -= 1.0;
    }
    if div == 0.0 {
        return (0.0, rem);
    }
    let mut floor = div.floor();
    if div - floor > 0.5 {
        floor += 1.0;
    }
    (floor, rem)
}

impl BitAnd for &Unit {
    type Output = CalcResult<Unit>;

    fn bitand(self, rhs: &Unit) -> CalcResult<Unit> {
        self.chain(rhs)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
