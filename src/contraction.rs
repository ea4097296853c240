use log::{debug, trace};

use crate::{
    error::TraceError,
    expansion::expand_with,
    expression::Expression,
    index::{Coefficient, IndexLabel},
    metric::{Metric, Overlap},
    product::Product,
    settings::TraceSettings,
};

/// Contracts `expression` over each pair in `contractions`, left to right, with the default
/// four-dimensional metric.
pub fn contract<I: IndexLabel, C: Coefficient>(
    expression: &Expression<I, C>,
    contractions: &[(I, I)],
) -> Result<Expression<I, C>, TraceError> {
    contract_with(expression, contractions, &TraceSettings::default())
}

pub fn contract_with<I: IndexLabel, C: Coefficient>(
    expression: &Expression<I, C>,
    contractions: &[(I, I)],
    settings: &TraceSettings<C>,
) -> Result<Expression<I, C>, TraceError> {
    let mut res = expression.clone();
    for (left, right) in contractions {
        res = contract_one(&res, left, right, settings)?;
    }
    Ok(res)
}

/// Saturates the index pair `(left, right)` in every product of `expression`.
///
/// Per product, each factor is one of
/// - `g^{left,right}` itself: replaced by the scalar `settings.dimension`,
/// - `g^{left,p}` or `g^{right,p}`: removed, leaving `p` dangling,
/// - anything else: kept.
///
/// Two dangling legs `p`, `q` are joined into a new factor `g^{p,q}`. The result is merged.
///
/// # Errors
///
/// [`TraceError::ContractionIndexNotFound`] unless every product carries the pair exactly
/// once, either as one factor or split across two.
pub fn contract_one<I: IndexLabel, C: Coefficient>(
    expression: &Expression<I, C>,
    left: &I,
    right: &I,
    settings: &TraceSettings<C>,
) -> Result<Expression<I, C>, TraceError> {
    debug!("contracting ({left}, {right}) over {} products", expression.len());

    let mut res = Vec::with_capacity(expression.len());
    for product in expression {
        let mut contracted = Product::scalar(product.multiplier().clone());
        // None marks a slot consumed by a full match.
        let mut residue: Vec<Option<&I>> = Vec::with_capacity(2);

        for term in product.terms() {
            match term.overlap(left, right) {
                Overlap::Full => {
                    residue.extend([None, None]);
                    contracted.multiply(settings.dimension.clone());
                }
                Overlap::Partial(other) => residue.push(Some(other)),
                Overlap::Disjoint => {
                    contracted.add_term(term.clone());
                }
            }
        }

        match residue.as_slice() {
            [None, None] => {}
            [Some(p), Some(q)] => {
                contracted.add_term(Metric::new((*p).clone(), (*q).clone())?);
            }
            _ => {
                return Err(TraceError::ContractionIndexNotFound {
                    left: left.to_string(),
                    right: right.to_string(),
                    product: product.to_string(),
                    found: residue.len(),
                })
            }
        }

        trace!("{product} -> {contracted}");
        res.push(contracted);
    }

    Ok(Expression::from(res).merged())
}

/// Expands the chain `indices` and contracts the result over `contractions`.
pub fn contracted_trace<I: IndexLabel>(
    indices: &[I],
    contractions: &[(I, I)],
) -> Result<Expression<I>, TraceError> {
    let settings = TraceSettings::default();
    contract_with(&expand_with(indices, &settings)?, contractions, &settings)
}
