//! Property-based tests for the scoring laws
//!
//! Invariants that should hold for ALL inputs:
//! - Reflexivity: compute(s, s) == 1
//! - Empty side: compute(s, "") == 0 when s has content
//! - Bounds: every score lies in [0, 1]
//! - Threshold: a score is either 0 or at least the threshold
//! - Symmetry for the order-independent measures

use proptest::prelude::*;
use textsim::{compute_with, Algorithm, LengthMode, SimilarityOptions};

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.'é-]{0,24}"
}

fn non_blank_text() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-zA-Z]{1,8}){0,3}"
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    proptest::sample::select(Algorithm::ALL.to_vec())
}

fn mode() -> impl Strategy<Value = LengthMode> {
    prop_oneof![
        Just(LengthMode::Bytes),
        Just(LengthMode::Codepoints),
        Just(LengthMode::Graphemes),
    ]
}

fn score(algorithm: Algorithm, left: &str, right: &str, options: &SimilarityOptions, mode: LengthMode) -> f64 {
    compute_with(algorithm, left, right, options, mode).unwrap()
}

/// Every algorithm except github-style, under a spread of options.
fn symmetric_cases() -> Vec<(&'static str, SimilarityOptions)> {
    vec![
        ("levenshtein", SimilarityOptions::new()),
        ("damerau-levenshtein", SimilarityOptions::new()),
        ("jaro-winkler", SimilarityOptions::new()),
        ("lcs-myers", SimilarityOptions::new()),
        ("ratcliff-obershelp", SimilarityOptions::new()),
        ("ratcliff-obershelp", SimilarityOptions::new().with_granularity("character")),
        ("jaccard", SimilarityOptions::new()),
        ("jaccard", SimilarityOptions::new().with_token_set(false)),
        ("sorensen-dice", SimilarityOptions::new()),
        ("sorensen-dice", SimilarityOptions::new().with_granularity("character")),
        ("cosine-ngrams", SimilarityOptions::new()),
        ("cosine-ngrams", SimilarityOptions::new().with_n(1).with_weighting("tfidf")),
        ("monge-elkan", SimilarityOptions::new()),
        ("monge-elkan", SimilarityOptions::new().with_secondary_metric("levenshtein")),
        ("monge-elkan", SimilarityOptions::new().with_secondary_metric("ratcliff-obershelp")),
        ("soft-tfidf", SimilarityOptions::new()),
        ("soft-tfidf", SimilarityOptions::new().with_secondary_metric("levenshtein")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reflexive(algorithm in algorithm(), s in text(), mode in mode()) {
        prop_assert_eq!(score(algorithm, &s, &s, &SimilarityOptions::new(), mode), 1.0);
    }

    #[test]
    fn prop_empty_side_scores_zero(algorithm in algorithm(), s in non_blank_text(), mode in mode()) {
        let options = SimilarityOptions::new();
        prop_assert_eq!(score(algorithm, &s, "", &options, mode), 0.0);
        prop_assert_eq!(score(algorithm, "", &s, &options, mode), 0.0);
    }

    #[test]
    fn prop_bounds(
        algorithm in algorithm(),
        a in text(),
        b in text(),
        mode in mode(),
        prefix_scale in 0.0f64..2.0,
        weight in 0.0f64..3.0,
    ) {
        let options = SimilarityOptions::new()
            .with_prefix_scale(prefix_scale)
            .with_weight_common_prefix(weight);
        let s = score(algorithm, &a, &b, &options, mode);
        prop_assert!((0.0..=1.0).contains(&s), "{} scored {}", algorithm, s);
    }

    #[test]
    fn prop_threshold(algorithm in algorithm(), a in text(), b in text(), threshold in 0.01f64..=1.0) {
        let plain = score(algorithm, &a, &b, &SimilarityOptions::new(), LengthMode::Graphemes);
        let gated = score(
            algorithm,
            &a,
            &b,
            &SimilarityOptions::new().with_threshold(threshold),
            LengthMode::Graphemes,
        );
        if plain < threshold {
            prop_assert_eq!(gated, 0.0);
        } else {
            prop_assert_eq!(gated, plain);
        }
    }

    #[test]
    fn prop_symmetric(a in text(), b in text(), mode in mode()) {
        for (name, options) in symmetric_cases() {
            let algorithm: Algorithm = name.parse().unwrap();
            let forward = score(algorithm, &a, &b, &options, mode);
            let backward = score(algorithm, &b, &a, &options, mode);
            prop_assert!((forward - backward).abs() < 1e-9, "{}: {} vs {}", name, forward, backward);
        }
    }
}
