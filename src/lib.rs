//! textsim - Multi-algorithm text similarity engine
//!
//! Normalizes, tokenizes, and scores two strings under one of eleven
//! similarity algorithms, returning a score in `[0, 1]`.
//!
//! # Features
//! - Edit distances (Levenshtein, true Damerau-Levenshtein), Jaro-Winkler
//! - Sequence measures (LCS, Ratcliff-Obershelp, GitHub-style prefix boost)
//! - Token overlap (Jaccard, Sørensen-Dice) and weighted n-gram cosine
//! - Hybrid token measures (Monge-Elkan, Soft-TFIDF) over a secondary metric
//! - Unicode-aware lengths: bytes, codepoints, or grapheme clusters
//!
//! # Example
//! ```
//! use textsim::{compute, LengthMode, SimilarityOptions};
//!
//! let opts = SimilarityOptions::new();
//! let score = compute("foo bar baz", "Foo, bar... baz!", "jaccard", &opts, LengthMode::Graphemes).unwrap();
//! assert_eq!(score, 1.0);
//! ```

pub mod algorithms;
pub mod engine;
pub mod error;
pub mod options;

pub use algorithms::tokenize::{prepare, PreparedInput};
pub use algorithms::weighting::Weighting;
pub use algorithms::{Algorithm, CompositeAlgorithm, PrimitiveAlgorithm, Similarity};
pub use engine::{compute, compute_with, distance, Engine, SNAP_EPSILON};
pub use error::{Result, SimilarityError};
pub use options::{resolve, CustomTokenizer, Granularity, LengthMode, ResolvedOptions, SimilarityOptions};
