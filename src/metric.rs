use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{error::TraceError, index::IndexLabel};

/// A single metric tensor factor `g^{left,right}`.
///
/// The legs are stored in canonical order, `left < right`, so that two metrics linking the
/// same labels are equal regardless of how they were built. Ordering is lexicographic on
/// `(left, right)` and is the order factors take inside a [`Product`](crate::Product).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "RawMetric<I>",
    bound(deserialize = "I: IndexLabel + Deserialize<'de>")
)]
pub struct Metric<I> {
    left: I,
    right: I,
}

#[derive(Deserialize)]
struct RawMetric<I> {
    left: I,
    right: I,
}

impl<I: IndexLabel> TryFrom<RawMetric<I>> for Metric<I> {
    type Error = TraceError;

    fn try_from(raw: RawMetric<I>) -> Result<Self, Self::Error> {
        Metric::new(raw.left, raw.right)
    }
}

/// How a metric factor sits relative to a pair of indices being contracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap<'a, I> {
    /// The metric links exactly the contracted pair.
    Full,
    /// One leg is contracted; the other leg is left dangling.
    Partial(&'a I),
    /// Neither leg is involved.
    Disjoint,
}

impl<I: IndexLabel> Metric<I> {
    pub fn new(a: I, b: I) -> Result<Self, TraceError> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Metric { left: a, right: b }),
            std::cmp::Ordering::Greater => Ok(Metric { left: b, right: a }),
            std::cmp::Ordering::Equal => Err(TraceError::IllFormedIndex(a.to_string())),
        }
    }

    pub fn left(&self) -> &I {
        &self.left
    }

    pub fn right(&self) -> &I {
        &self.right
    }

    pub fn contains(&self, index: &I) -> bool {
        &self.left == index || &self.right == index
    }

    /// Classifies this factor against the contracted pair `(left, right)`, in either orientation.
    pub fn overlap<'a>(&'a self, left: &I, right: &I) -> Overlap<'a, I> {
        if (&self.left == left && &self.right == right)
            || (&self.left == right && &self.right == left)
        {
            Overlap::Full
        } else if &self.left == left || &self.left == right {
            Overlap::Partial(&self.right)
        } else if &self.right == left || &self.right == right {
            Overlap::Partial(&self.left)
        } else {
            Overlap::Disjoint
        }
    }
}

impl<I: Display> Display for Metric<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g^{{{},{}}}", self.left, self.right)
    }
}

impl<I> From<Metric<I>> for (I, I) {
    fn from(value: Metric<I>) -> Self {
        (value.left, value.right)
    }
}
