use log::trace;

use crate::{
    error::TraceError,
    expression::Expression,
    index::{Coefficient, IndexLabel},
    metric::Metric,
    product::Product,
    settings::TraceSettings,
};

/// Expands the trace of the gamma chain `γ^{indices[0]} γ^{indices[1]} …` with the default
/// four-dimensional normalisation.
///
/// See [`expand_with`].
pub fn expand<I: IndexLabel>(indices: &[I]) -> Result<Expression<I>, TraceError> {
    expand_with(indices, &TraceSettings::default())
}

/// Expands the trace of a gamma chain into a sum of metric products.
///
/// The first index is paired with every later position `i` in turn. Moving it next to its
/// partner crosses `i - 1` other gammas, so the term carries `(-1)^(i-1)`; the remaining
/// chain is expanded recursively. An empty chain gives `1`, an odd chain gives `0`.
///
/// The output contains `(n-1)!!` products for a chain of even length `n` and is not merged.
///
/// # Errors
///
/// [`TraceError::IllFormedIndex`] if two equal labels end up paired.
pub fn expand_with<I: IndexLabel, C: Coefficient>(
    indices: &[I],
    settings: &TraceSettings<C>,
) -> Result<Expression<I, C>, TraceError> {
    let expanded = expand_chain(indices, settings)?;
    trace!(
        "expanded chain of {} gammas into {} products",
        indices.len(),
        expanded.len()
    );
    Ok(expanded.into())
}

fn expand_chain<I: IndexLabel, C: Coefficient>(
    indices: &[I],
    settings: &TraceSettings<C>,
) -> Result<Vec<Product<I, C>>, TraceError> {
    match indices {
        [] => return Ok(vec![Product::one()]),
        _ if indices.len() % 2 == 1 => return Ok(Vec::new()),
        [a, b] => {
            let mut product = Product::scalar(settings.identity_trace.clone());
            product.add_term(Metric::new(a.clone(), b.clone())?);
            return Ok(vec![product]);
        }
        _ => {}
    }

    let first = &indices[0];
    // Rest of the chain without positions 0 and i, updated in place as i advances.
    let mut rest = indices[2..].to_vec();
    let mut res = Vec::new();

    for i in 1..indices.len() {
        let metric = Metric::new(first.clone(), indices[i].clone())?;

        if i >= 2 {
            rest[i - 2] = indices[i - 1].clone();
        }

        let sign = if i % 2 == 1 { C::one() } else { -C::one() };
        for mut product in expand_chain(&rest, settings)? {
            product.multiply(sign.clone()).add_term(metric.clone());
            res.push(product);
        }
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use crate::expression::stringify;

    use super::*;

    fn str(indices: &[&str]) -> String {
        stringify(&expand(indices).unwrap())
    }

    fn double_factorial(n: usize) -> usize {
        (1..=n).rev().step_by(2).product()
    }

    #[test]
    fn trivial_chains() {
        assert_eq!(str(&[]), "+1");
        assert_eq!(str(&["a"]), "0");
        assert_eq!(str(&["a", "b", "c"]), "0");
        assert_eq!(str(&["u", "v"]), "+4*g^{u,v}");
        assert_eq!(str(&["v", "u"]), "+4*g^{u,v}");
    }

    #[test]
    fn four_gammas() {
        assert_eq!(
            str(&["u", "v", "w", "y"]),
            "+4*g^{u,v}*g^{w,y}-4*g^{u,w}*g^{v,y}+4*g^{u,y}*g^{v,w}"
        );
    }

    #[test]
    fn product_count() {
        for n in [0usize, 2, 4, 6, 8] {
            let chain: Vec<usize> = (0..n).collect();
            let expanded = expand(&chain).unwrap();
            assert_eq!(expanded.len(), double_factorial(n.saturating_sub(1)), "n = {n}");
            assert!(expanded
                .iter()
                .all(|p| p.terms().len() == n / 2 && p.multiplier().abs() == if n == 0 { 1 } else { 4 }));
        }
    }

    #[test]
    fn input_untouched() {
        let chain = vec!["a", "b", "c", "d", "e", "f"];
        let copy = chain.clone();
        expand(&chain).unwrap();
        assert_eq!(chain, copy);
    }

    #[test]
    fn repeated_labels() {
        assert_eq!(
            expand(&["u", "u"]),
            Err(TraceError::IllFormedIndex("u".into()))
        );
        assert!(expand(&["u", "v", "u", "w"]).is_err());
    }

    #[test]
    fn custom_normalisation() {
        let settings = TraceSettings::default().with_identity_trace(2i64);
        let expanded = expand_with(&["a", "b", "c", "d"], &settings).unwrap();
        assert_eq!(
            stringify(&expanded),
            "+2*g^{a,b}*g^{c,d}-2*g^{a,c}*g^{b,d}+2*g^{a,d}*g^{b,c}"
        );
    }
}
