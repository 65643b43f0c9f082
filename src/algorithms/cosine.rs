//! Cosine similarity over weighted n-gram vectors
//!
//! Units (tokens or characters) are grouped into n-grams, counted, weighted
//! under a [`Weighting`], and compared by the cosine of the angle between the
//! two vectors.
//!
//! # Complexity
//! - Time: O(m+n) for building vectors and computing similarity
//! - Space: O(unique n-grams)

use super::ngram::build_ngrams;
use super::weighting::{weigh, TermCounts, WeightVector, Weighting};

/// Cosine of the angle between two weight vectors.
///
/// Two empty vectors score 1.0; one empty or zero-norm vector scores 0.0.
#[must_use]
pub fn cosine_from_weights(a: &WeightVector<'_>, b: &WeightVector<'_>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let magnitude = a.norm() * b.norm();
    if magnitude == 0.0 {
        0.0
    } else {
        a.dot(b) / magnitude
    }
}

/// N-gram cosine similarity of two unit sequences.
#[must_use]
pub fn cosine_ngram_similarity<S: AsRef<str>>(a: &[S], b: &[S], n: usize, weighting: Weighting) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_grams = build_ngrams(a, n);
    let b_grams = build_ngrams(b, n);

    let a_counts = TermCounts::from_terms(a_grams.iter().map(String::as_str));
    let b_counts = TermCounts::from_terms(b_grams.iter().map(String::as_str));

    let a_weights = weigh(&a_counts, &b_counts, weighting);
    let b_weights = weigh(&b_counts, &a_counts, weighting);

    cosine_from_weights(&a_weights, &b_weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_identical_and_disjoint() {
        let a = ["the", "quick", "brown", "fox"];
        assert!(approx_eq(cosine_ngram_similarity(&a, &a, 2, Weighting::Tf), 1.0));
        assert!(approx_eq(cosine_ngram_similarity(&a, &["lazy", "dog"], 1, Weighting::Tf), 0.0));
    }

    #[test]
    fn test_unigram_tf() {
        let a = ["the", "quick", "brown", "fox"];
        let b = ["the", "quick", "brown", "dog"];
        // 3 shared of 4 each
        assert!(approx_eq(cosine_ngram_similarity(&a, &b, 1, Weighting::Tf), 0.75));
    }

    #[test]
    fn test_bigrams_are_order_sensitive() {
        let a = ["new", "york"];
        let b = ["york", "new"];
        assert!(approx_eq(cosine_ngram_similarity(&a, &b, 1, Weighting::Tf), 1.0));
        assert!(approx_eq(cosine_ngram_similarity(&a, &b, 2, Weighting::Tf), 0.0));
    }

    #[test]
    fn test_tfidf_discounts_shared_terms() {
        let a = ["common", "rare"];
        let b = ["common", "other"];
        let tf = cosine_ngram_similarity(&a, &b, 1, Weighting::Tf);
        let tfidf = cosine_ngram_similarity(&a, &b, 1, Weighting::TfIdf);
        assert!(tfidf < tf);
        assert!(tfidf > 0.0);
    }

    #[test]
    fn test_every_weighting_is_reflexive() {
        let a = ["a", "b", "a", "c"];
        for w in [
            Weighting::Binary,
            Weighting::Tf,
            Weighting::Log,
            Weighting::Augmented,
            Weighting::DoubleNormalization,
            Weighting::TfIdf,
        ] {
            assert!(approx_eq(cosine_ngram_similarity(&a, &a, 2, w), 1.0), "{:?}", w);
        }
    }
}
