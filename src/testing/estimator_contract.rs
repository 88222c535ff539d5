//! Conformance suite every [`Estimator`] backend must pass.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    detector::DetectError,
    estimator::{Estimator, ReferenceEstimator, TrialParams},
    profile::{LanguageProfile, ProfileRegistry},
};

/// Largest per-language gap tolerated between a backend and the `f64`
/// reference on the fixture.
pub const REFERENCE_TOLERANCE: f64 = 1e-3;

/// Run every contract against the backend built by `$make`, a
/// `Fn(Arc<ProfileRegistry>) -> E` where `E: Estimator`.
///
/// 1. `output_is_a_distribution`: one entry per language, sums to 1
/// 2. `same_seed_same_estimate`
/// 3. `parallel_trials_match_sequential`
/// 4. `empty_features_are_rejected`
/// 5. `zero_prior_stays_zero`
/// 6. `decisive_grams_win`
/// 7. `unknown_grams_are_drawn_but_skipped`
/// 8. `agrees_with_reference`
macro_rules! assert_estimator_contract {
    ($make:expr) => {{
        use $crate::testing::estimator_contract as contract;
        contract::output_is_a_distribution(&$make);
        contract::same_seed_same_estimate(&$make);
        contract::parallel_trials_match_sequential(&$make);
        contract::empty_features_are_rejected(&$make);
        contract::zero_prior_stays_zero(&$make);
        contract::decisive_grams_win(&$make);
        contract::unknown_grams_are_drawn_but_skipped(&$make);
        contract::agrees_with_reference(&$make);
    }};
}

pub(crate) use assert_estimator_contract;

/// en / fr / ja, single-character grams only.
pub fn fixture() -> Arc<ProfileRegistry> {
    Arc::new(
        ProfileRegistry::new([
            LanguageProfile::from_tokens("en", "a a a b b c c d e"),
            LanguageProfile::from_tokens("fr", "a b b c c c d d d"),
            LanguageProfile::from_tokens(
                "ja",
                "\u{3042} \u{3042} \u{3042} \u{3044} \u{3046} \u{3048} \u{3048}",
            ),
        ])
        .expect("fixture languages are distinct"),
    )
}

fn grams(list: &[&str]) -> Vec<String> {
    list.iter().map(|g| g.to_string()).collect()
}

fn estimate<E: Estimator>(
    estimator: &mut E,
    features: &[String],
    prior: Option<&[f64]>,
    params: &TrialParams,
    seed: u64,
) -> Vec<f64> {
    estimator
        .estimate(features, prior, params, &mut StdRng::seed_from_u64(seed))
        .expect("fixture feature lists are non-empty")
}

fn argmax(prob: &[f64]) -> usize {
    prob.iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(i, _)| i)
}

pub fn output_is_a_distribution<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let registry = fixture();
    let mut estimator = make(Arc::clone(&registry));
    let prob = estimate(
        &mut estimator,
        &grams(&["a", "b", "c", "d"]),
        None,
        &TrialParams::default(),
        11,
    );
    assert_eq!(prob.len(), registry.lang_count());
    assert!(prob.iter().all(|p| (0.0..=1.0 + 1e-6).contains(p)), "{prob:?}");
    let sum: f64 = prob.iter().sum();
    assert!((sum - 1.0).abs() < 1e-4, "sum = {sum}");
}

pub fn same_seed_same_estimate<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let mut estimator = make(fixture());
    let features = grams(&["a", "b", "d", "\u{3042}"]);
    let params = TrialParams::default();
    let first = estimate(&mut estimator, &features, None, &params, 99);
    let second = estimate(&mut estimator, &features, None, &params, 99);
    assert_eq!(first, second);
}

pub fn parallel_trials_match_sequential<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let mut estimator = make(fixture());
    let features = grams(&["a", "b", "c", "d", "d"]);
    let sequential = TrialParams::default();
    let parallel = TrialParams {
        parallel: true,
        ..sequential
    };
    let a = estimate(&mut estimator, &features, None, &sequential, 2024);
    let b = estimate(&mut estimator, &features, None, &parallel, 2024);
    assert_eq!(a, b);
}

pub fn empty_features_are_rejected<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let mut estimator = make(fixture());
    let err = estimator
        .estimate(&[], None, &TrialParams::default(), &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert_eq!(err, DetectError::NoFeatures);
}

pub fn zero_prior_stays_zero<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let mut estimator = make(fixture());
    let prob = estimate(
        &mut estimator,
        &grams(&["e"]),
        Some(&[0.0, 0.5, 0.5]),
        &TrialParams::default(),
        3,
    );
    assert_eq!(prob[0], 0.0, "{prob:?}");
}

pub fn decisive_grams_win<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let mut estimator = make(fixture());
    let params = TrialParams::default();
    for (features, expected) in [
        (grams(&["e"]), 0),
        (grams(&["d", "d", "c"]), 1),
        (grams(&["\u{3042}", "\u{3048}"]), 2),
    ] {
        let prob = estimate(&mut estimator, &features, None, &params, 17);
        assert_eq!(argmax(&prob), expected, "{features:?} -> {prob:?}");
    }
}

pub fn unknown_grams_are_drawn_but_skipped<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let registry = fixture();
    let mut estimator = make(Arc::clone(&registry));
    let params = TrialParams {
        iteration_limit: 10,
        ..TrialParams::default()
    };

    let uniform = 1.0 / registry.lang_count() as f64;
    let prob = estimate(&mut estimator, &grams(&["zz"]), None, &params, 6);
    assert!(prob.iter().all(|p| (p - uniform).abs() < 1e-6), "{prob:?}");

    let prior = [0.2, 0.3, 0.5];
    let prob = estimate(&mut estimator, &grams(&["zz", "qq"]), Some(&prior), &params, 6);
    for (p, want) in prob.iter().zip(prior) {
        assert!((p - want).abs() < 1e-6, "{prob:?}");
    }

    let mut mixed = grams(&["a"]);
    mixed.extend(grams(&["zz"; 7]));
    let mut reference = ReferenceEstimator::new(registry);
    let got = estimate(&mut estimator, &mixed, None, &params, 6);
    let want = estimate(&mut reference, &mixed, None, &params, 6);
    for (g, w) in got.iter().zip(&want) {
        assert!((g - w).abs() < REFERENCE_TOLERANCE, "{got:?} vs {want:?}");
    }
}

pub fn agrees_with_reference<E, F>(make: &F)
where
    E: Estimator,
    F: Fn(Arc<ProfileRegistry>) -> E,
{
    let registry = fixture();
    let mut estimator = make(Arc::clone(&registry));
    let mut reference = ReferenceEstimator::new(registry);
    let params = TrialParams::default();
    for features in [
        grams(&["e"]),
        grams(&["b", "d"]),
        grams(&["\u{3042}", "\u{3042}", "a"]),
    ] {
        let got = estimate(&mut estimator, &features, None, &params, 5);
        let want = estimate(&mut reference, &features, None, &params, 5);
        assert_eq!(argmax(&got), argmax(&want), "{features:?}");
        for (g, w) in got.iter().zip(&want) {
            assert!((g - w).abs() < REFERENCE_TOLERANCE, "{features:?}: {got:?} vs {want:?}");
        }
    }
}
