//! Term counting and weighting schemes
//!
//! Turns a token multiset into a sparse weight vector. Terms keep their
//! first-occurrence order so that sums over a vector are reproducible.

use crate::error::{Result, SimilarityError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of documents in the corpus formed by the two inputs
const CORPUS_SIZE: f64 = 2.0;

/// Weighting strategy for term vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weighting {
    /// 1 for every present term
    Binary,
    /// Raw count
    Tf,
    /// `1 + ln(count)`
    Log,
    /// `0.5 + 0.5 * count / max_count`
    Augmented,
    /// Same formula as [`Weighting::Augmented`], under its textbook name
    #[serde(rename = "double-normalization-0.5")]
    DoubleNormalization,
    /// `count * (ln((D + 1) / (df + 1)) + 1)` over the two-document corpus
    #[serde(rename = "tfidf")]
    TfIdf,
}

impl FromStr for Weighting {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "binary" => Ok(Weighting::Binary),
            "tf" => Ok(Weighting::Tf),
            "log" => Ok(Weighting::Log),
            "augmented" => Ok(Weighting::Augmented),
            "double-normalization-0.5" => Ok(Weighting::DoubleNormalization),
            "tfidf" | "tf-idf" => Ok(Weighting::TfIdf),
            _ => Err(SimilarityError::invalid(format!(
                "unknown weighting '{}'. Valid: binary, tf, log, augmented, \
                 double-normalization-0.5, tfidf",
                s
            ))),
        }
    }
}

/// Multiset of terms with first-occurrence ordering
#[derive(Debug, Clone, Default)]
pub struct TermCounts<'a> {
    terms: Vec<(&'a str, usize)>,
    index: AHashMap<&'a str, usize>,
}

impl<'a> TermCounts<'a> {
    /// Count terms from any iterator of string slices
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = TermCounts::default();
        for term in terms {
            match counts.index.get(term) {
                Some(&slot) => counts.terms[slot].1 += 1,
                None => {
                    counts.index.insert(term, counts.terms.len());
                    counts.terms.push((term, 1));
                }
            }
        }
        counts
    }

    /// Count of `term`, 0 if absent
    pub fn get(&self, term: &str) -> usize {
        self.index.get(term).map_or(0, |&slot| self.terms[slot].1)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Distinct terms with their counts
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.terms.iter().copied()
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.terms.iter().map(|&(_, c)| c).sum()
    }

    pub fn max_count(&self) -> usize {
        self.terms.iter().map(|&(_, c)| c).max().unwrap_or(0)
    }
}

/// Sparse weight vector keyed by term
#[derive(Debug, Clone, Default)]
pub struct WeightVector<'a> {
    weights: Vec<(&'a str, f64)>,
    index: AHashMap<&'a str, usize>,
}

impl<'a> WeightVector<'a> {
    pub fn get(&self, term: &str) -> f64 {
        self.index.get(term).map_or(0.0, |&slot| self.weights[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        self.weights.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &WeightVector<'_>) -> f64 {
        self.weights.iter().map(|&(term, w)| w * other.get(term)).sum()
    }
}

/// Weight `counts` under `weighting`.
///
/// `other` is the opposite side of the pair; it is consulted only by
/// [`Weighting::TfIdf`] to compute document frequencies.
pub fn weigh<'a>(counts: &TermCounts<'a>, other: &TermCounts<'_>, weighting: Weighting) -> WeightVector<'a> {
    let max_count = counts.max_count().max(1) as f64;
    let mut vector = WeightVector::default();

    for (term, count) in counts.iter() {
        let count_f = count as f64;
        let weight = match weighting {
            Weighting::Binary => 1.0,
            Weighting::Tf => count_f,
            Weighting::Log => 1.0 + count_f.ln(),
            Weighting::Augmented | Weighting::DoubleNormalization => 0.5 + 0.5 * count_f / max_count,
            Weighting::TfIdf => {
                let df = if other.contains(term) { 2.0 } else { 1.0 };
                count_f * (((CORPUS_SIZE + 1.0) / (df + 1.0)).ln() + 1.0)
            }
        };
        vector.index.insert(term, vector.weights.len());
        vector.weights.push((term, weight));
    }

    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_term_counts_order_and_totals() {
        let counts = TermCounts::from_terms(["b", "a", "b", "c", "b"]);
        let order: Vec<_> = counts.iter().collect();
        assert_eq!(order, vec![("b", 3), ("a", 1), ("c", 1)]);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.max_count(), 3);
        assert_eq!(counts.get("z"), 0);
    }

    #[test]
    fn test_simple_weightings() {
        let counts = TermCounts::from_terms(["x", "x", "x", "x", "y"]);
        let empty = TermCounts::default();

        let binary = weigh(&counts, &empty, Weighting::Binary);
        assert!(approx_eq(binary.get("x"), 1.0));

        let tf = weigh(&counts, &empty, Weighting::Tf);
        assert!(approx_eq(tf.get("x"), 4.0));

        let log = weigh(&counts, &empty, Weighting::Log);
        assert!(approx_eq(log.get("x"), 1.0 + 4f64.ln()));
        assert!(approx_eq(log.get("y"), 1.0));

        let augmented = weigh(&counts, &empty, Weighting::Augmented);
        assert!(approx_eq(augmented.get("x"), 1.0));
        assert!(approx_eq(augmented.get("y"), 0.625));
        let double = weigh(&counts, &empty, Weighting::DoubleNormalization);
        assert!(approx_eq(double.get("y"), 0.625));
    }

    #[test]
    fn test_tfidf_document_frequency() {
        let left = TermCounts::from_terms(["shared", "only", "only"]);
        let right = TermCounts::from_terms(["shared"]);
        let weights = weigh(&left, &right, Weighting::TfIdf);

        // df = 2: ln(3/3) + 1 = 1
        assert!(approx_eq(weights.get("shared"), 1.0));
        // df = 1: 2 * (ln(3/2) + 1)
        assert!(approx_eq(weights.get("only"), 2.0 * (1.5f64.ln() + 1.0)));
    }

    #[test]
    fn test_norm_and_dot() {
        let a = TermCounts::from_terms(["p", "q"]);
        let b = TermCounts::from_terms(["q", "r"]);
        let va = weigh(&a, &b, Weighting::Tf);
        let vb = weigh(&b, &a, Weighting::Tf);
        assert!(approx_eq(va.norm(), 2f64.sqrt()));
        assert!(approx_eq(va.dot(&vb), 1.0));
    }

    #[test]
    fn test_weighting_parse() {
        assert_eq!("double-normalization-0.5".parse::<Weighting>().unwrap(), Weighting::DoubleNormalization);
        assert_eq!("TF_IDF".parse::<Weighting>().unwrap(), Weighting::TfIdf);
        assert!("bm25".parse::<Weighting>().is_err());
    }
}
