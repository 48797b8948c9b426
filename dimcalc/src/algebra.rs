//! Term algebra
//!
//! A [`Product`] is a formal product of terms raised to exact rational
//! exponents, `a^p · b^q · ...`. It backs both [`crate::Dimension`] (terms are
//! base dimension names) and the display symbols of composite units (terms are
//! unit symbols such as `km` and `h`).
//!
//! Exponents are [`Exponent`] (`Ratio<i64>`), never floating point, so
//! `(x^(1/2))^2 == x` holds exactly.

use num_rational::Ratio;
use num_traits::{One, Signed, Zero};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Exact rational exponent
pub type Exponent = Ratio<i64>;

/// Shorthand for an integer exponent
pub fn int(n: i64) -> Exponent {
    Exponent::from_integer(n)
}

/// Shorthand for a fractional exponent `numer/denom`
///
/// Panics if `denom` is zero, like `Ratio::new`.
pub fn frac(numer: i64, denom: i64) -> Exponent {
    Exponent::new(numer, denom)
}

/// Render an exponent: `2`, `-1`, or `(1/2)`
pub fn format_exponent(exp: &Exponent) -> String {
    if exp.is_integer() {
        exp.to_integer().to_string()
    } else {
        format!("({}/{})", exp.numer(), exp.denom())
    }
}

/// A product of terms raised to rational exponents
///
/// Terms with exponent zero are never stored, so two products are equal
/// exactly when their non-trivial exponents are equal. The empty product is
/// the multiplicative identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Product<T: Ord> {
    terms: BTreeMap<T, Exponent>,
}

impl<T: Ord> Default for Product<T> {
    fn default() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }
}

impl<T: Ord + Clone> Product<T> {
    /// The empty product
    pub fn identity() -> Self {
        Self::default()
    }

    /// A single term with exponent 1
    pub fn term(term: T) -> Self {
        Self::from_terms([(term, Exponent::one())])
    }

    /// Build from `(term, exponent)` pairs; repeated terms accumulate
    pub fn from_terms(pairs: impl IntoIterator<Item = (T, Exponent)>) -> Self {
        let mut product = Self::default();
        for (term, exp) in pairs {
            product.accumulate(term, exp);
        }
        product
    }

    fn accumulate(&mut self, term: T, exp: Exponent) {
        match self.terms.entry(term) {
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += exp;
                if slot.get().is_zero() {
                    slot.remove();
                }
            }
            Entry::Vacant(slot) => {
                if !exp.is_zero() {
                    slot.insert(exp);
                }
            }
        }
    }

    /// Add the exponents of `other` onto a copy of `self`
    pub fn product(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (term, exp) in &other.terms {
            result.accumulate(term.clone(), *exp);
        }
        result
    }

    /// Subtract the exponents of `other` from a copy of `self`
    pub fn quotient(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (term, exp) in &other.terms {
            result.accumulate(term.clone(), -*exp);
        }
        result
    }

    /// Multiply every exponent by `exp`
    pub fn powr(&self, exp: Exponent) -> Self {
        if exp.is_zero() {
            return Self::identity();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(term, e)| (term.clone(), *e * exp))
                .collect(),
        }
    }

    pub fn recip(&self) -> Self {
        self.powr(-Exponent::one())
    }
}

impl<T: Ord> Product<T> {
    pub fn is_identity(&self) -> bool {
        self.terms.is_empty()
    }

    /// Exponent of `term`, zero when absent
    pub fn exponent(&self, term: &T) -> Exponent {
        self.terms.get(term).copied().unwrap_or_else(Exponent::zero)
    }

    /// The only term, if the product is exactly `term^1`
    pub fn single(&self) -> Option<&T> {
        match self.terms.iter().next() {
            Some((term, exp)) if self.terms.len() == 1 && exp.is_one() => Some(term),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &Exponent)> {
        self.terms.iter()
    }

    /// Terms with positive exponents first, each group ordered by `key`
    pub fn ordered_by<K: Ord>(&self, key: impl Fn(&T) -> K) -> Vec<(&T, Exponent)> {
        let mut terms: Vec<(&T, Exponent)> = self.terms.iter().map(|(t, e)| (t, *e)).collect();
        terms.sort_by(|(ta, ea), (tb, eb)| {
            ea.is_negative()
                .cmp(&eb.is_negative())
                .then_with(|| key(ta).cmp(&key(tb)))
        });
        terms
    }
}

/// `a b^2 c^-1`
pub fn format_spaced<T>(terms: &[(&T, Exponent)], label: impl Fn(&T) -> String) -> String {
    if terms.is_empty() {
        return "1".to_string();
    }
    terms
        .iter()
        .map(|(term, exp)| with_exponent(label(term), exp))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `a·b^2/c`, or `1/c` when every exponent is negative
pub fn format_fraction<T>(terms: &[(&T, Exponent)], label: impl Fn(&T) -> String) -> String {
    let numerator: Vec<String> = terms
        .iter()
        .filter(|(_, exp)| exp.is_positive())
        .map(|(term, exp)| with_exponent(label(term), exp))
        .collect();
    let denominator: Vec<String> = terms
        .iter()
        .filter(|(_, exp)| exp.is_negative())
        .map(|(term, exp)| with_exponent(label(term), &-*exp))
        .collect();

    let top = if numerator.is_empty() {
        "1".to_string()
    } else {
        numerator.join("·")
    };
    match denominator.len() {
        0 => top,
        1 => format!("{}/{}", top, denominator[0]),
        _ => format!("{}/({})", top, denominator.join("·")),
    }
}

fn with_exponent(label: String, exp: &Exponent) -> String {
    if exp.is_one() {
        label
    } else {
        format!("{}^{}", label, format_exponent(exp))
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Product<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.ordered_by(|_| ());
        write!(f, "{}", format_fraction(&terms, |t| t.to_string()))
    }
}
