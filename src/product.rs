use std::fmt::{self, Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    index::{Coefficient, IndexLabel},
    metric::Metric,
};

/// A monomial `multiplier · g(f1) · g(f2) · … · g(fk)`.
///
/// The metric factors are kept sorted at all times: they only enter through
/// [`Product::add_term`], which inserts at the binary-search position. Two products with the
/// same factors therefore have identical `terms` and can be merged by adding multipliers.
///
/// The mutating methods return `&mut Self` so a freshly built product can be assembled in one
/// chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "RawProduct<I, C>",
    bound(deserialize = "I: IndexLabel + Deserialize<'de>, C: Coefficient + Deserialize<'de>")
)]
pub struct Product<I, C = i64> {
    multiplier: C,
    terms: Vec<Metric<I>>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "I: IndexLabel + Deserialize<'de>, C: Deserialize<'de>"))]
struct RawProduct<I, C> {
    multiplier: C,
    terms: Vec<Metric<I>>,
}

impl<I: IndexLabel, C: Coefficient> From<RawProduct<I, C>> for Product<I, C> {
    fn from(raw: RawProduct<I, C>) -> Self {
        let mut product = Product::scalar(raw.multiplier);
        for term in raw.terms {
            product.add_term(term);
        }
        product
    }
}

impl<I: IndexLabel, C: Coefficient> Product<I, C> {
    /// The caller guarantees that `terms` is already sorted.
    pub fn new(multiplier: C, terms: Vec<Metric<I>>) -> Self {
        debug_assert!(terms.windows(2).all(|w| w[0] <= w[1]));
        Product { multiplier, terms }
    }

    pub fn scalar(multiplier: C) -> Self {
        Product {
            multiplier,
            terms: Vec::new(),
        }
    }

    pub fn one() -> Self {
        Self::scalar(C::one())
    }

    pub fn multiplier(&self) -> &C {
        &self.multiplier
    }

    pub fn terms(&self) -> &[Metric<I>] {
        &self.terms
    }

    pub fn is_scalar(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every label carried by the factors, in factor order.
    pub fn indices(&self) -> impl Iterator<Item = &I> {
        self.terms.iter().flat_map(|m| [m.left(), m.right()])
    }

    pub fn add(&mut self, delta: C) -> &mut Self {
        self.multiplier = self.multiplier.clone() + delta;
        self
    }

    pub fn multiply(&mut self, factor: C) -> &mut Self {
        self.multiplier = self.multiplier.clone() * factor;
        self
    }

    pub fn add_term(&mut self, term: Metric<I>) -> &mut Self {
        let pos = self.terms.binary_search(&term).unwrap_or_else(|e| e);
        self.terms.insert(pos, term);
        self
    }

    /// True when both products carry the same sequence of factors.
    pub fn is_mergeable(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len()
            && self.terms.iter().zip(&other.terms).all(|(a, b)| a == b)
    }

    pub(crate) fn into_parts(self) -> (C, Vec<Metric<I>>) {
        (self.multiplier, self.terms)
    }
}

impl<I: Display, C: Coefficient> Display for Product<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.multiplier.is_unit();
        let negative_unit = self.multiplier.is_negative_unit();

        if self.terms.is_empty() {
            if unit {
                return write!(f, "+1");
            } else if negative_unit {
                return write!(f, "-1");
            }
        }

        if unit {
            write!(f, "+")?;
        } else if negative_unit {
            write!(f, "-")?;
        } else if self.multiplier.is_positive() {
            write!(f, "+{}", self.multiplier)?;
        } else {
            write!(f, "{}", self.multiplier)?;
        }

        if !(unit || negative_unit) && !self.terms.is_empty() {
            write!(f, "*")?;
        }
        write!(f, "{}", self.terms.iter().join("*"))
    }
}
