mod prop_tests {
    use crate::{
        Detector, LanguageProfile, ProfileRegistry,
        ngram::{N_GRAM, extract_ngrams},
        pipeline::preprocess_pipeline,
        stage::{CollapseSeparators, Stage, Truncate},
        unicode::normalize_char,
    };
    use proptest::prelude::*;
    use std::{borrow::Cow, collections::HashMap, sync::Arc};

    fn registry() -> Arc<ProfileRegistry> {
        Arc::new(
            ProfileRegistry::new([
                LanguageProfile::from_tokens("en", "a a a b b c c d e"),
                LanguageProfile::from_tokens("fr", "a b b c c c d d d"),
                LanguageProfile::from_tokens("ja", "\u{3042} \u{3042} \u{3042}"),
            ])
            .unwrap(),
        )
    }

    proptest! {
        #[test]
        fn normalize_char_idempotent(c in any::<char>()) {
            let once = normalize_char(c);
            prop_assert_eq!(normalize_char(once), once);
        }

        #[test]
        fn collapse_idempotent(s in "[ a-z\\t\u{3000}]{0,200}") {
            let stage = CollapseSeparators;
            let once = stage.apply(Cow::Borrowed(&s)).into_owned();
            let twice = stage.apply(Cow::Borrowed(&once));
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(twice.as_ref(), once.as_str());
            prop_assert!(matches!(twice, Cow::Borrowed(_)));
        }

        #[test]
        fn truncation_bound(s in ".{0,300}", max in 0usize..200) {
            let out = Truncate::new(max).apply(Cow::Borrowed(&s));
            prop_assert_eq!(out.chars().count(), s.chars().count().min(max));
            prop_assert!(s.starts_with(out.as_ref()));
        }

        #[test]
        fn preprocessed_text_is_trimmed(s in ".{0,300}") {
            let out = preprocess_pipeline(100).process(Cow::Borrowed(&s));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_ref());
            prop_assert!(out.chars().count() <= 100);
        }

        #[test]
        fn grams_are_short_and_not_blank(s in ".{0,200}") {
            for gram in extract_ngrams(&s, |_| true) {
                let len = gram.chars().count();
                prop_assert!((1..=N_GRAM).contains(&len), "{gram:?}");
                prop_assert!(!gram.chars().all(char::is_whitespace), "{gram:?}");
            }
        }

        #[test]
        fn prior_sums_to_one_and_keeps_ratios(
            weights in prop::collection::vec(0.0f64..1000.0, 3),
        ) {
            prop_assume!(weights.iter().sum::<f64>() > 0.0);
            let mut detector = Detector::builder(registry()).seed(0).build();
            let map: HashMap<&str, f64> = ["en", "fr", "ja"].into_iter().zip(weights.iter().copied()).collect();
            detector.set_prior_map(&map).unwrap();

            let prior = detector.prior().unwrap();
            let sum: f64 = prior.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            let total: f64 = weights.iter().sum();
            for (p, w) in prior.iter().zip(&weights) {
                prop_assert!((p - w / total).abs() < 1e-9);
            }
        }

        #[test]
        fn negative_weight_always_rejected(w in -1000.0f64..-1e-9, other in 0.0f64..10.0) {
            let mut detector = Detector::builder(registry()).seed(0).build();
            let map = HashMap::from([("fr", w), ("en", other)]);
            prop_assert!(detector.set_prior_map(&map).is_err());
            prop_assert!(detector.prior().is_none());
        }
    }
}
