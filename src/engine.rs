//! The similarity pipeline
//!
//! `compute` resolves options, prepares both inputs, dispatches to one of the
//! eleven algorithms, and post-processes the raw score:
//!
//! 1. clamp to `[0, 1]`
//! 2. snap values within [`SNAP_EPSILON`] of a bound onto the bound
//! 3. zero out scores below a positive threshold
//!
//! All failures happen before scoring, during option resolution or input
//! preparation.

use crate::algorithms::hybrid::{monge_elkan_similarity, soft_tfidf_similarity, SecondaryMetric};
use crate::algorithms::tokenize::{prepare, PreparedInput};
use crate::algorithms::{
    cosine_ngram_similarity, damerau_levenshtein_similarity, github_style_similarity,
    jaccard_similarity, jaro_winkler_similarity, lcs_myers_similarity, levenshtein_similarity,
    ratcliff_obershelp_similarity, sorensen_dice_similarity, Algorithm, CompositeAlgorithm,
    PrimitiveAlgorithm, Similarity,
};
use crate::error::Result;
use crate::options::{resolve, LengthMode, ResolvedOptions, SimilarityOptions};

/// Scores within this distance of 0 or 1 are snapped onto the bound.
pub const SNAP_EPSILON: f64 = 1e-12;

/// Similarity of `left` and `right` under the named algorithm.
///
/// # Errors
///
/// Returns [`crate::SimilarityError::InvalidArgument`] for an unknown
/// algorithm name, an invalid option, or malformed custom tokenizer output.
///
/// # Example
/// ```
/// use textsim::{compute, LengthMode, SimilarityOptions};
///
/// let score = compute("kitten", "sitting", "levenshtein", &SimilarityOptions::new(), LengthMode::Graphemes).unwrap();
/// assert!((score - 4.0 / 7.0).abs() < 1e-9);
/// ```
pub fn compute(
    left: &str,
    right: &str,
    algorithm: &str,
    options: &SimilarityOptions,
    mode: LengthMode,
) -> Result<f64> {
    let algorithm: Algorithm = algorithm.parse()?;
    compute_with(algorithm, left, right, options, mode)
}

/// Like [`compute`] with an already-parsed [`Algorithm`].
pub fn compute_with(
    algorithm: Algorithm,
    left: &str,
    right: &str,
    options: &SimilarityOptions,
    mode: LengthMode,
) -> Result<f64> {
    let opts = resolve(algorithm, options, mode)?;
    score_resolved(algorithm, left, right, &opts)
}

/// `1 - compute(...)`
pub fn distance(
    left: &str,
    right: &str,
    algorithm: &str,
    options: &SimilarityOptions,
    mode: LengthMode,
) -> Result<f64> {
    compute(left, right, algorithm, options, mode).map(|score| 1.0 - score)
}

fn score_resolved(algorithm: Algorithm, left: &str, right: &str, opts: &ResolvedOptions) -> Result<f64> {
    let left = prepare(left, opts)?;
    let right = prepare(right, opts)?;
    Ok(score_prepared(algorithm, &left, &right, opts))
}

/// Score two prepared inputs and apply clamp, snap, and threshold.
pub fn score_prepared(
    algorithm: Algorithm,
    left: &PreparedInput,
    right: &PreparedInput,
    opts: &ResolvedOptions,
) -> f64 {
    log::debug!(
        "{}: granularity={:?} tokens={}/{} characters={}/{}",
        algorithm,
        opts.granularity,
        left.tokens().len(),
        right.tokens().len(),
        left.characters().len(),
        right.characters().len()
    );

    let raw = match algorithm {
        Algorithm::Primitive(primitive) => score_primitive(primitive, left, right, opts),
        Algorithm::Composite(composite) => score_composite(composite, left, right, opts),
    };
    let score = finalize(raw, opts.threshold);

    log::trace!("{}: raw={} final={}", algorithm, raw, score);
    score
}

/// Whether `input` has no units for the given algorithm.
fn has_no_units(algorithm: Algorithm, input: &PreparedInput) -> bool {
    match algorithm {
        Algorithm::Primitive(PrimitiveAlgorithm::Levenshtein) => input.normalized().is_empty(),
        Algorithm::Primitive(PrimitiveAlgorithm::DamerauLevenshtein | PrimitiveAlgorithm::JaroWinkler) => {
            input.characters().is_empty()
        }
        _ => input.tokens().is_empty(),
    }
}

fn degenerate(algorithm: Algorithm, left: &PreparedInput, right: &PreparedInput) -> Option<f64> {
    match (has_no_units(algorithm, left), has_no_units(algorithm, right)) {
        (true, true) => Some(1.0),
        (true, false) | (false, true) => Some(0.0),
        (false, false) => None,
    }
}

/// Raw (unclamped) score of a primitive algorithm.
pub(crate) fn score_primitive(
    algorithm: PrimitiveAlgorithm,
    left: &PreparedInput,
    right: &PreparedInput,
    opts: &ResolvedOptions,
) -> f64 {
    if let Some(score) = degenerate(algorithm.into(), left, right) {
        return score;
    }

    match algorithm {
        PrimitiveAlgorithm::Levenshtein => levenshtein_similarity(left.normalized(), right.normalized(), opts.mode),
        PrimitiveAlgorithm::DamerauLevenshtein => {
            damerau_levenshtein_similarity(left.characters(), right.characters(), opts.transposition_cost)
        }
        PrimitiveAlgorithm::JaroWinkler => jaro_winkler_similarity(
            left.characters(),
            right.characters(),
            opts.prefix_scale,
            opts.prefix_limit,
        ),
        PrimitiveAlgorithm::LcsMyers => {
            lcs_myers_similarity(left.tokens(), right.tokens(), opts.weight_common_prefix)
        }
        PrimitiveAlgorithm::RatcliffObershelp => ratcliff_obershelp_similarity(left.tokens(), right.tokens()),
        PrimitiveAlgorithm::Jaccard => jaccard_similarity(left.tokens(), right.tokens(), opts.token_set),
        PrimitiveAlgorithm::SorensenDice => {
            sorensen_dice_similarity(left.tokens(), right.tokens(), opts.token_set)
        }
        PrimitiveAlgorithm::CosineNgrams => {
            cosine_ngram_similarity(left.tokens(), right.tokens(), opts.n, opts.weighting)
        }
        PrimitiveAlgorithm::GithubStyle => github_style_similarity(
            left.tokens(),
            right.tokens(),
            opts.prefix_scale,
            opts.prefix_limit,
        ),
    }
}

fn score_composite(
    algorithm: CompositeAlgorithm,
    left: &PreparedInput,
    right: &PreparedInput,
    opts: &ResolvedOptions,
) -> f64 {
    if let Some(score) = degenerate(algorithm.into(), left, right) {
        return score;
    }

    let metric = opts.secondary_metric.unwrap_or(PrimitiveAlgorithm::JaroWinkler);
    let secondary = SecondaryMetric::new(metric, opts);
    log::trace!("{}: secondary={} tau={}", algorithm.name(), metric, opts.tau);

    match algorithm {
        CompositeAlgorithm::MongeElkan => monge_elkan_similarity(left.tokens(), right.tokens(), &secondary, opts.tau),
        CompositeAlgorithm::SoftTfidf => soft_tfidf_similarity(left.tokens(), right.tokens(), &secondary, opts.tau),
    }
}

/// Clamp to `[0, 1]`, snap near-bound values, then apply `threshold`.
#[must_use]
pub fn finalize(raw: f64, threshold: f64) -> f64 {
    let clamped = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
    let snapped = if clamped < SNAP_EPSILON {
        0.0
    } else if 1.0 - clamped < SNAP_EPSILON {
        1.0
    } else {
        clamped
    };
    if threshold > 0.0 && snapped < threshold {
        0.0
    } else {
        snapped
    }
}

/// An algorithm bound to resolved options and a length mode.
///
/// Options are validated once at construction, so scoring can only fail on
/// malformed custom tokenizer output.
///
/// Through the [`Similarity`] trait such a failure is logged and reported as
/// `0.0`, which cannot be told apart from a genuinely dissimilar pair. Callers
/// that install a custom tokenizer and need the error must call
/// [`Engine::score`], which returns it.
///
/// # Example
/// ```
/// use textsim::{Algorithm, Engine, LengthMode, PrimitiveAlgorithm, Similarity, SimilarityOptions};
///
/// let engine = Engine::new(Algorithm::from(PrimitiveAlgorithm::JaroWinkler), &SimilarityOptions::new(), LengthMode::Graphemes).unwrap();
/// assert!(engine.similarity("MARTHA", "MARHTA") > 0.96);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    algorithm: Algorithm,
    opts: ResolvedOptions,
}

impl Engine {
    /// # Errors
    ///
    /// Fails when `options` do not resolve for `algorithm`.
    pub fn new(algorithm: Algorithm, options: &SimilarityOptions, mode: LengthMode) -> Result<Self> {
        let opts = resolve(algorithm, options, mode)?;
        Ok(Engine { algorithm, opts })
    }

    /// Build an engine from an algorithm name.
    pub fn from_name(name: &str, options: &SimilarityOptions, mode: LengthMode) -> Result<Self> {
        Self::new(name.parse()?, options, mode)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.opts
    }

    /// Score a pair with the bound algorithm and options.
    pub fn score(&self, left: &str, right: &str) -> Result<f64> {
        score_resolved(self.algorithm, left, right, &self.opts)
    }
}

impl Similarity for Engine {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        match self.score(a, b) {
            Ok(score) => score,
            Err(e) => {
                log::warn!("{}: scoring failed, returning 0.0: {}", self.algorithm, e);
                0.0
            }
        }
    }

    fn name(&self) -> &'static str {
        self.algorithm.name()
    }
}
