use std::fmt::{Debug, Display};
use std::hash::Hash;

use num::Signed;

/// A type that can label one leg of a metric tensor.
///
/// Labels are opaque: the only things the algebra needs are a total order, to put the
/// two legs of a [`Metric`](crate::Metric) in canonical order, and hashing, to collapse
/// identical products. Strings, integers and user enums all qualify.
pub trait IndexLabel: Ord + Hash + Clone + Debug + Display {}

impl<T> IndexLabel for T where T: Ord + Hash + Clone + Debug + Display {}

/// The numeric multiplier of a [`Product`](crate::Product).
///
/// Only exact ring operations are ever performed, so `i64`, [`num::BigInt`] and
/// [`num::rational::Ratio`] all work.
pub trait Coefficient: Signed + Clone + PartialOrd + Debug + Display {
    /// Builds `n` from repeated addition of one, so that no numeric conversion can fail.
    fn from_count(n: usize) -> Self {
        (0..n).fold(Self::zero(), |acc, _| acc + Self::one())
    }

    fn is_unit(&self) -> bool {
        self.is_one()
    }

    fn is_negative_unit(&self) -> bool {
        (-self.clone()).is_one()
    }
}

impl<T> Coefficient for T where T: Signed + Clone + PartialOrd + Debug + Display {}
