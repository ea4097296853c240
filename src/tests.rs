use num::BigInt;
use rand::{seq::SliceRandom, SeedableRng};
use rand_xoshiro::Xoroshiro64Star;

use crate::{
    contract, contract_with, expand, expand_with, merge, stringify, Expression, Metric, Product,
    TraceError, TraceSettings,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn canonical<I: crate::IndexLabel>(expression: &Expression<I>) -> Vec<(Vec<Metric<I>>, i64)> {
    let mut terms: Vec<_> = expression
        .iter()
        .map(|p| (p.terms().to_vec(), *p.multiplier()))
        .collect();
    terms.sort();
    terms
}

/// Chain with a doubled label, contracted into a sum with repeated factor sequences.
fn unmerged_sample() -> Expression<usize> {
    let mut sample = expand(&[0usize, 1, 2, 3, 4, 5]).unwrap();
    sample.extend(expand(&[0usize, 1, 2, 3, 4, 5]).unwrap().into_iter().map(|mut p| {
        p.multiply(-1);
        p
    }));
    sample.extend(expand(&[0usize, 2, 1, 3, 4, 5]).unwrap());
    sample.extend(expand(&[5usize, 4, 3, 2, 1, 0]).unwrap());
    sample
}

#[test]
fn merge_is_idempotent() {
    init();
    let once = merge(unmerged_sample());
    let twice = merge(once.clone());
    assert_eq!(stringify(&once), stringify(&twice));
    assert_eq!(once, twice);
}

#[test]
fn merge_ignores_input_order() {
    init();
    let reference = canonical(&merge(unmerged_sample()));
    assert!(!reference.is_empty());

    let mut rng = Xoroshiro64Star::seed_from_u64(42);
    for _ in 0..8 {
        let mut products: Vec<_> = unmerged_sample().into_iter().collect();
        products.shuffle(&mut rng);
        let merged = merge(Expression::from(products));
        assert_eq!(canonical(&merged), reference);
    }
}

#[test]
fn merged_has_no_duplicates_or_zeros() {
    let merged = merge(unmerged_sample());
    for (i, a) in merged.iter().enumerate() {
        assert_ne!(*a.multiplier(), 0);
        for b in merged.iter().skip(i + 1) {
            assert!(!a.is_mergeable(b), "{a} and {b}");
        }
    }
}

#[test]
fn reversed_chain_has_same_trace() {
    // Tr(γ^a γ^b … γ^f) is invariant under reversal of the chain
    let forward = merge(expand(&["a", "b", "c", "d", "e", "f"]).unwrap());
    let backward = merge(expand(&["f", "e", "d", "c", "b", "a"]).unwrap());
    assert_eq!(canonical(&forward), canonical(&backward));
}

#[test]
fn cyclic_chain_has_same_trace() {
    let forward = merge(expand(&[1, 2, 3, 4, 5, 6]).unwrap());
    let cycled = merge(expand(&[2, 3, 4, 5, 6, 1]).unwrap());
    assert_eq!(canonical(&forward), canonical(&cycled));
}

#[test]
fn contraction_order_does_not_matter() {
    init();
    let chain = expand(&["a", "b", "c", "d", "e", "f"]).unwrap();
    let one = contract(&chain, &[("a", "d"), ("b", "e")]).unwrap();
    let other = contract(&chain, &[("e", "b"), ("d", "a")]).unwrap();
    assert_eq!(canonical(&one), canonical(&other));
}

#[test]
fn big_coefficients() {
    let settings = TraceSettings::<BigInt>::default();
    let chain: Vec<u32> = (0..8).collect();
    let pairs: Vec<(u32, u32)> = (0..4).map(|i| (2 * i, 2 * i + 1)).collect();
    let saturated = contract_with(&expand_with(&chain, &settings).unwrap(), &pairs, &settings)
        .unwrap();

    let small = contract(&expand(&chain).unwrap(), &pairs).unwrap();
    assert_eq!(stringify(&saturated), stringify(&small));
}

#[test]
fn errors_render() {
    assert_eq!(
        Metric::new("x", "x").unwrap_err().to_string(),
        "Ill-formed indices x and x"
    );

    let err = contract(&expand(&["u", "v"]).unwrap(), &[("u", "w")]).unwrap_err();
    assert!(matches!(err, TraceError::ContractionIndexNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Contraction indices (u, w) not found in +4*g^{u,v}: 1 residual slots instead of 2"
    );
}

#[test]
fn serde_roundtrip() {
    let chain = expand(&["a".to_string(), "b".into(), "c".into(), "d".into()]).unwrap();
    let json = serde_json::to_string(&chain).unwrap();
    let back: Expression<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, chain);

    let settings: TraceSettings = serde_json::from_str(r#"{"identity_trace":4,"dimension":6}"#)
        .unwrap();
    assert_eq!(settings, TraceSettings::default().with_dimension(6));
}

#[test]
fn scalar_products() {
    let e: Expression<&str> = vec![Product::scalar(3), Product::scalar(-3), Product::one()].into();
    assert_eq!(stringify(&e), "+3-3+1");
    assert_eq!(stringify(&merge(e)), "+1");
}
