/*!

Symbolic traces of chains of Dirac gamma matrices.

A chain `γ^{a} γ^{b} γ^{c} …` is given as an ordered list of index labels. Its trace is
expanded into a sum of products of metric tensors `g^{a,b}` using the pairwise
(Wick-style) rule, with an alternating sign coming from anticommutation and an overall
factor of `4`, the trace of the identity on bispinor space.

The resulting [`Expression`] can then be contracted over pairs of indices with [`contract`],
saturating metric factors against each other.

```
use dirac_trace::{contract, expand, stringify};

let chain = expand(&["u", "v", "r", "s"]).unwrap();
assert_eq!(
    stringify(&chain),
    "+4*g^{r,s}*g^{u,v}-4*g^{r,u}*g^{s,v}+4*g^{r,v}*g^{s,u}"
);

let saturated = contract(&chain, &[("u", "v")]).unwrap();
assert_eq!(stringify(&saturated), "+16*g^{r,s}");
```

Index labels are anything implementing [`IndexLabel`]; the canonical order inside a
[`Metric`] is the label's [`Ord`]. Multipliers are any [`Coefficient`], `i64` by default.

*/

/// Gamma-chain trace expansion
pub mod expansion;
/// Index saturation on expressions
pub mod contraction;
pub mod error;
pub mod expression;
pub mod index;
pub mod metric;
pub mod product;
pub mod settings;

pub use contraction::{contract, contract_one, contract_with, contracted_trace};
pub use error::TraceError;
pub use expansion::{expand, expand_with};
pub use expression::{merge, stringify, Expression};
pub use index::{Coefficient, IndexLabel};
pub use metric::{Metric, Overlap};
pub use product::Product;
pub use settings::TraceSettings;

#[cfg(test)]
mod tests;
