use std::fmt::{self, Display};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::TraceError,
    index::{Coefficient, IndexLabel},
    metric::Metric,
    product::Product,
    settings::TraceSettings,
};

/// A sum of [`Product`]s.
///
/// Products are kept in insertion order, which only matters for display. Two expressions are
/// equal as symbolic objects when their [`merged`](Expression::merged) forms render to the same
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(deserialize = "I: IndexLabel + Deserialize<'de>, C: Coefficient + Deserialize<'de>")
)]
pub struct Expression<I, C = i64> {
    products: Vec<Product<I, C>>,
}

impl<I, C> Default for Expression<I, C> {
    fn default() -> Self {
        Expression {
            products: Vec::new(),
        }
    }
}

impl<I: IndexLabel, C: Coefficient> Expression<I, C> {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Expression {
            products: vec![Product::one()],
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product<I, C>] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product<I, C>> {
        self.products.iter()
    }

    pub fn push(&mut self, product: Product<I, C>) {
        self.products.push(product);
    }

    /// Collapses products with identical factors and drops those whose multiplier cancels.
    ///
    /// Distinct factor sequences appear in the order they were first seen.
    pub fn merged(self) -> Self {
        let before = self.products.len();
        let mut collected: IndexMap<Vec<Metric<I>>, C, ahash::RandomState> =
            IndexMap::with_capacity_and_hasher(before, ahash::RandomState::new());

        for product in self.products {
            let (multiplier, terms) = product.into_parts();
            match collected.get_mut(&terms) {
                Some(acc) => *acc = acc.clone() + multiplier,
                None => {
                    collected.insert(terms, multiplier);
                }
            }
        }

        let products: Vec<_> = collected
            .into_iter()
            .filter(|(_, multiplier)| !multiplier.is_zero())
            .map(|(terms, multiplier)| Product::new(multiplier, terms))
            .collect();

        debug!("merged {} products into {}", before, products.len());
        Expression { products }
    }

    pub fn contract(&self, contractions: &[(I, I)]) -> Result<Self, TraceError> {
        crate::contraction::contract_with(self, contractions, &TraceSettings::default())
    }
}

/// Canonical form of `expression`: see [`Expression::merged`].
pub fn merge<I: IndexLabel, C: Coefficient>(expression: Expression<I, C>) -> Expression<I, C> {
    expression.merged()
}

/// The canonical string of an expression, `0` when it has no products.
pub fn stringify<I: IndexLabel, C: Coefficient>(expression: &Expression<I, C>) -> String {
    expression.to_string()
}

impl<I: Display, C: Coefficient> Display for Expression<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.products.is_empty() {
            return write!(f, "0");
        }
        for product in &self.products {
            write!(f, "{product}")?;
        }
        Ok(())
    }
}

impl<I, C> From<Vec<Product<I, C>>> for Expression<I, C> {
    fn from(products: Vec<Product<I, C>>) -> Self {
        Expression { products }
    }
}

impl<I, C> FromIterator<Product<I, C>> for Expression<I, C> {
    fn from_iter<T: IntoIterator<Item = Product<I, C>>>(iter: T) -> Self {
        Expression {
            products: iter.into_iter().collect(),
        }
    }
}

impl<I, C> Extend<Product<I, C>> for Expression<I, C> {
    fn extend<T: IntoIterator<Item = Product<I, C>>>(&mut self, iter: T) {
        self.products.extend(iter);
    }
}

impl<I, C> IntoIterator for Expression<I, C> {
    type Item = Product<I, C>;
    type IntoIter = std::vec::IntoIter<Product<I, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

impl<'a, I, C> IntoIterator for &'a Expression<I, C> {
    type Item = &'a Product<I, C>;
    type IntoIter = std::slice::Iter<'a, Product<I, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
