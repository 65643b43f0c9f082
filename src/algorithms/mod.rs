//! Core string similarity algorithms
//!
//! Each algorithm is implemented as a standalone function over unit slices
//! for composability. The closed [`Algorithm`] enum names the eleven
//! algorithms the engine dispatches to.

pub mod cosine;
pub mod damerau;
pub mod hybrid;
pub mod jaro;
pub mod lcs;
pub mod levenshtein;
pub mod ngram;
pub mod normalize;
pub mod ratcliff;
pub mod set;
pub mod tokenize;
pub mod weighting;

pub use cosine::*;
pub use damerau::*;
pub use jaro::*;
pub use lcs::*;
pub use levenshtein::*;
pub use ngram::*;
pub use ratcliff::*;
pub use set::*;

use crate::error::{Result, SimilarityError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Algorithms that score a pair directly, without delegating to another metric.
///
/// Only these may serve as the secondary metric of a composite algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveAlgorithm {
    /// Classic edit distance over the normalized string
    Levenshtein,
    /// Unrestricted Damerau-Levenshtein over characters
    DamerauLevenshtein,
    /// Jaro similarity with Winkler prefix bonus
    JaroWinkler,
    /// Dice-style LCS ratio with optional prefix bonus
    LcsMyers,
    /// Recursive longest-common-run matching
    RatcliffObershelp,
    /// Set or multiset intersection over union
    Jaccard,
    /// Set or multiset Dice coefficient
    SorensenDice,
    /// Weighted n-gram vectors compared by cosine
    CosineNgrams,
    /// LCS ratio plus uncapped leading-run bonus
    GithubStyle,
}

/// Algorithms that score token pairs through a secondary [`PrimitiveAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeAlgorithm {
    MongeElkan,
    SoftTfidf,
}

/// One of the eleven similarity algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Primitive(PrimitiveAlgorithm),
    Composite(CompositeAlgorithm),
}

impl PrimitiveAlgorithm {
    pub const ALL: [PrimitiveAlgorithm; 9] = [
        PrimitiveAlgorithm::Levenshtein,
        PrimitiveAlgorithm::DamerauLevenshtein,
        PrimitiveAlgorithm::JaroWinkler,
        PrimitiveAlgorithm::LcsMyers,
        PrimitiveAlgorithm::RatcliffObershelp,
        PrimitiveAlgorithm::Jaccard,
        PrimitiveAlgorithm::SorensenDice,
        PrimitiveAlgorithm::CosineNgrams,
        PrimitiveAlgorithm::GithubStyle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveAlgorithm::Levenshtein => "levenshtein",
            PrimitiveAlgorithm::DamerauLevenshtein => "damerau-levenshtein",
            PrimitiveAlgorithm::JaroWinkler => "jaro-winkler",
            PrimitiveAlgorithm::LcsMyers => "lcs-myers",
            PrimitiveAlgorithm::RatcliffObershelp => "ratcliff-obershelp",
            PrimitiveAlgorithm::Jaccard => "jaccard",
            PrimitiveAlgorithm::SorensenDice => "sorensen-dice",
            PrimitiveAlgorithm::CosineNgrams => "cosine-ngrams",
            PrimitiveAlgorithm::GithubStyle => "github-style",
        }
    }
}

impl CompositeAlgorithm {
    pub const ALL: [CompositeAlgorithm; 2] =
        [CompositeAlgorithm::MongeElkan, CompositeAlgorithm::SoftTfidf];

    pub fn name(&self) -> &'static str {
        match self {
            CompositeAlgorithm::MongeElkan => "monge-elkan",
            CompositeAlgorithm::SoftTfidf => "soft-tfidf",
        }
    }
}

impl Algorithm {
    /// All eleven algorithms, primitives first
    pub const ALL: [Algorithm; 11] = [
        Algorithm::Primitive(PrimitiveAlgorithm::Levenshtein),
        Algorithm::Primitive(PrimitiveAlgorithm::DamerauLevenshtein),
        Algorithm::Primitive(PrimitiveAlgorithm::JaroWinkler),
        Algorithm::Primitive(PrimitiveAlgorithm::LcsMyers),
        Algorithm::Primitive(PrimitiveAlgorithm::RatcliffObershelp),
        Algorithm::Primitive(PrimitiveAlgorithm::Jaccard),
        Algorithm::Primitive(PrimitiveAlgorithm::SorensenDice),
        Algorithm::Primitive(PrimitiveAlgorithm::CosineNgrams),
        Algorithm::Primitive(PrimitiveAlgorithm::GithubStyle),
        Algorithm::Composite(CompositeAlgorithm::MongeElkan),
        Algorithm::Composite(CompositeAlgorithm::SoftTfidf),
    ];

    /// Get the algorithm name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Primitive(p) => p.name(),
            Algorithm::Composite(c) => c.name(),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Algorithm::Composite(_))
    }
}

/// Canonicalize an algorithm name: case-insensitive, `_` and ` ` read as `-`.
fn canonical_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for Algorithm {
    type Err = SimilarityError;

    fn from_str(name: &str) -> Result<Self> {
        let canonical = canonical_name(name);
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algo| algo.name() == canonical)
            .ok_or_else(|| {
                let valid: Vec<&str> = Algorithm::ALL.iter().map(|a| a.name()).collect();
                SimilarityError::invalid(format!(
                    "unknown algorithm '{}'. Valid: {}",
                    name,
                    valid.join(", ")
                ))
            })
    }
}

impl FromStr for PrimitiveAlgorithm {
    type Err = SimilarityError;

    fn from_str(name: &str) -> Result<Self> {
        match name.parse::<Algorithm>()? {
            Algorithm::Primitive(p) => Ok(p),
            Algorithm::Composite(c) => Err(SimilarityError::invalid(format!(
                "secondary_metric '{}' is a composite algorithm and cannot be nested",
                c.name()
            ))),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SimilarityError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<Algorithm> for String {
    fn from(algo: Algorithm) -> Self {
        algo.name().to_string()
    }
}

impl From<PrimitiveAlgorithm> for Algorithm {
    fn from(p: PrimitiveAlgorithm) -> Self {
        Algorithm::Primitive(p)
    }
}

impl From<CompositeAlgorithm> for Algorithm {
    fn from(c: CompositeAlgorithm) -> Self {
        Algorithm::Composite(c)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for PrimitiveAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names_roundtrip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
        }
    }

    #[test]
    fn test_algorithm_aliases() {
        assert_eq!(
            "Damerau_Levenshtein".parse::<Algorithm>().unwrap(),
            Algorithm::Primitive(PrimitiveAlgorithm::DamerauLevenshtein)
        );
        assert_eq!(
            "soft_tfidf".parse::<Algorithm>().unwrap(),
            Algorithm::Composite(CompositeAlgorithm::SoftTfidf)
        );
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = "hamming".parse::<Algorithm>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("hamming"));
    }

    #[test]
    fn test_composite_is_not_primitive() {
        assert!("monge-elkan".parse::<PrimitiveAlgorithm>().is_err());
        assert!("soft-tfidf".parse::<PrimitiveAlgorithm>().is_err());
        assert_eq!(
            "jaccard".parse::<PrimitiveAlgorithm>().unwrap(),
            PrimitiveAlgorithm::Jaccard
        );
    }

    #[test]
    fn test_is_composite() {
        let composites: Vec<_> = Algorithm::ALL.iter().filter(|a| a.is_composite()).collect();
        assert_eq!(composites.len(), 2);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Algorithm::Primitive(PrimitiveAlgorithm::LcsMyers)).unwrap();
        assert_eq!(json, "\"lcs-myers\"");
        let parsed: Algorithm = serde_json::from_str("\"monge_elkan\"").unwrap();
        assert_eq!(parsed, Algorithm::Composite(CompositeAlgorithm::MongeElkan));
        let primitive: PrimitiveAlgorithm = serde_json::from_str("\"github-style\"").unwrap();
        assert_eq!(primitive, PrimitiveAlgorithm::GithubStyle);
    }
}
