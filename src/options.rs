//! Option resolution for the similarity engine
//!
//! Callers pass a partial [`SimilarityOptions`]; [`resolve`] merges it over
//! per-algorithm defaults over global defaults, validates every field, and
//! produces an immutable [`ResolvedOptions`]. Algorithm bodies only ever see
//! resolved options.

use crate::algorithms::weighting::Weighting;
use crate::algorithms::{Algorithm, CompositeAlgorithm, PrimitiveAlgorithm};
use crate::error::{Result, SimilarityError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Unit of comparison for token-based algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Whitespace-delimited fields
    #[default]
    Token,
    /// Maximal runs of letters and digits
    Word,
    /// Characters under the active [`LengthMode`]
    Character,
}

impl FromStr for Granularity {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "token" => Ok(Granularity::Token),
            "word" => Ok(Granularity::Word),
            "character" => Ok(Granularity::Character),
            _ => Err(SimilarityError::invalid(format!(
                "unknown granularity '{}'. Valid: token, word, character",
                s
            ))),
        }
    }
}

/// How string length and characters are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthMode {
    /// UTF-8 bytes
    Bytes,
    /// Unicode scalar values
    Codepoints,
    /// Extended grapheme clusters
    #[default]
    Graphemes,
}

impl FromStr for LengthMode {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bytes" | "byte" => Ok(LengthMode::Bytes),
            "codepoints" | "codepoint" | "chars" => Ok(LengthMode::Codepoints),
            "graphemes" | "grapheme" => Ok(LengthMode::Graphemes),
            _ => Err(SimilarityError::invalid(format!(
                "unknown length mode '{}'. Valid: bytes, codepoints, graphemes",
                s
            ))),
        }
    }
}

/// User-supplied tokenizer: receives the normalized string and resolved options.
pub type CustomTokenizer = Arc<dyn Fn(&str, &ResolvedOptions) -> Vec<String> + Send + Sync>;

/// Caller-supplied partial options.
///
/// Every field is optional; unset fields fall back to algorithm defaults and
/// then to global defaults. Enum-valued fields are strings so that option maps
/// arriving from JSON are validated at resolution time.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimilarityOptions {
    pub granularity: Option<String>,
    pub case_sensitive: Option<bool>,
    pub normalize_whitespace: Option<bool>,
    pub strip_punctuation: Option<bool>,
    pub threshold: Option<f64>,
    pub prefix_scale: Option<f64>,
    pub prefix_limit: Option<i64>,
    pub weight_common_prefix: Option<f64>,
    pub token_set: Option<bool>,
    pub n: Option<i64>,
    pub weighting: Option<String>,
    pub transposition_cost: Option<i64>,
    pub secondary_metric: Option<String>,
    pub tau: Option<f64>,
    #[serde(skip)]
    pub tokenizer: Option<CustomTokenizer>,
}

impl fmt::Debug for SimilarityOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityOptions")
            .field("granularity", &self.granularity)
            .field("case_sensitive", &self.case_sensitive)
            .field("normalize_whitespace", &self.normalize_whitespace)
            .field("strip_punctuation", &self.strip_punctuation)
            .field("threshold", &self.threshold)
            .field("prefix_scale", &self.prefix_scale)
            .field("prefix_limit", &self.prefix_limit)
            .field("weight_common_prefix", &self.weight_common_prefix)
            .field("token_set", &self.token_set)
            .field("n", &self.n)
            .field("weighting", &self.weighting)
            .field("transposition_cost", &self.transposition_cost)
            .field("secondary_metric", &self.secondary_metric)
            .field("tau", &self.tau)
            .field("tokenizer", &self.tokenizer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl SimilarityOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an option map from JSON. Unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SimilarityError::invalid(format!("malformed options: {}", e)))
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: impl Into<String>) -> Self {
        self.granularity = Some(granularity.into());
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    #[must_use]
    pub fn with_normalize_whitespace(mut self, normalize: bool) -> Self {
        self.normalize_whitespace = Some(normalize);
        self
    }

    #[must_use]
    pub fn with_strip_punctuation(mut self, strip: bool) -> Self {
        self.strip_punctuation = Some(strip);
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_prefix_scale(mut self, scale: f64) -> Self {
        self.prefix_scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_prefix_limit(mut self, limit: i64) -> Self {
        self.prefix_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_weight_common_prefix(mut self, weight: f64) -> Self {
        self.weight_common_prefix = Some(weight);
        self
    }

    #[must_use]
    pub fn with_token_set(mut self, token_set: bool) -> Self {
        self.token_set = Some(token_set);
        self
    }

    #[must_use]
    pub fn with_n(mut self, n: i64) -> Self {
        self.n = Some(n);
        self
    }

    #[must_use]
    pub fn with_weighting(mut self, weighting: impl Into<String>) -> Self {
        self.weighting = Some(weighting.into());
        self
    }

    #[must_use]
    pub fn with_transposition_cost(mut self, cost: i64) -> Self {
        self.transposition_cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_secondary_metric(mut self, metric: impl Into<String>) -> Self {
        self.secondary_metric = Some(metric.into());
        self
    }

    #[must_use]
    pub fn with_tau(mut self, tau: f64) -> Self {
        self.tau = Some(tau);
        self
    }

    #[must_use]
    pub fn with_tokenizer<F>(mut self, tokenizer: F) -> Self
    where
        F: Fn(&str, &ResolvedOptions) -> Vec<String> + Send + Sync + 'static,
    {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merged_with(&self, overrides: &SimilarityOptions) -> SimilarityOptions {
        SimilarityOptions {
            granularity: overrides.granularity.clone().or_else(|| self.granularity.clone()),
            case_sensitive: overrides.case_sensitive.or(self.case_sensitive),
            normalize_whitespace: overrides.normalize_whitespace.or(self.normalize_whitespace),
            strip_punctuation: overrides.strip_punctuation.or(self.strip_punctuation),
            threshold: overrides.threshold.or(self.threshold),
            prefix_scale: overrides.prefix_scale.or(self.prefix_scale),
            prefix_limit: overrides.prefix_limit.or(self.prefix_limit),
            weight_common_prefix: overrides.weight_common_prefix.or(self.weight_common_prefix),
            token_set: overrides.token_set.or(self.token_set),
            n: overrides.n.or(self.n),
            weighting: overrides.weighting.clone().or_else(|| self.weighting.clone()),
            transposition_cost: overrides.transposition_cost.or(self.transposition_cost),
            secondary_metric: overrides
                .secondary_metric
                .clone()
                .or_else(|| self.secondary_metric.clone()),
            tau: overrides.tau.or(self.tau),
            tokenizer: overrides.tokenizer.clone().or_else(|| self.tokenizer.clone()),
        }
    }

    /// Global defaults shared by every algorithm.
    pub fn global_defaults() -> Self {
        SimilarityOptions {
            granularity: Some("token".to_string()),
            case_sensitive: Some(false),
            normalize_whitespace: Some(true),
            strip_punctuation: None,
            threshold: Some(0.0),
            prefix_scale: Some(0.1),
            prefix_limit: Some(4),
            weight_common_prefix: Some(0.0),
            token_set: Some(true),
            n: Some(2),
            weighting: Some("tf".to_string()),
            transposition_cost: Some(1),
            secondary_metric: None,
            tau: Some(0.0),
            tokenizer: None,
        }
    }

    /// Per-algorithm defaults, layered between global defaults and caller options.
    pub fn algorithm_defaults(algorithm: Algorithm) -> Self {
        let base = SimilarityOptions::default();
        match algorithm {
            Algorithm::Primitive(PrimitiveAlgorithm::JaroWinkler) => {
                base.with_prefix_scale(0.1).with_prefix_limit(4)
            }
            Algorithm::Primitive(PrimitiveAlgorithm::DamerauLevenshtein) => {
                base.with_transposition_cost(1)
            }
            Algorithm::Primitive(PrimitiveAlgorithm::GithubStyle) => {
                base.with_prefix_scale(0.05).with_prefix_limit(4)
            }
            Algorithm::Primitive(PrimitiveAlgorithm::CosineNgrams) => {
                base.with_n(2).with_weighting("tf")
            }
            Algorithm::Composite(CompositeAlgorithm::MongeElkan) => {
                base.with_secondary_metric("jaro-winkler").with_tau(0.0)
            }
            Algorithm::Composite(CompositeAlgorithm::SoftTfidf) => {
                base.with_secondary_metric("jaro-winkler").with_tau(0.9)
            }
            Algorithm::Primitive(_) => base,
        }
    }
}

/// Fully resolved and validated options.
#[derive(Clone)]
pub struct ResolvedOptions {
    pub granularity: Granularity,
    pub case_sensitive: bool,
    pub normalize_whitespace: bool,
    pub strip_punctuation: bool,
    pub threshold: f64,
    pub mode: LengthMode,
    pub tokenizer: Option<CustomTokenizer>,
    pub prefix_scale: f64,
    pub prefix_limit: usize,
    pub weight_common_prefix: f64,
    pub token_set: bool,
    pub n: usize,
    pub weighting: Weighting,
    pub transposition_cost: usize,
    pub secondary_metric: Option<PrimitiveAlgorithm>,
    pub tau: f64,
}

impl fmt::Debug for ResolvedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("granularity", &self.granularity)
            .field("case_sensitive", &self.case_sensitive)
            .field("normalize_whitespace", &self.normalize_whitespace)
            .field("strip_punctuation", &self.strip_punctuation)
            .field("threshold", &self.threshold)
            .field("mode", &self.mode)
            .field("tokenizer", &self.tokenizer.as_ref().map(|_| "<fn>"))
            .field("prefix_scale", &self.prefix_scale)
            .field("prefix_limit", &self.prefix_limit)
            .field("weight_common_prefix", &self.weight_common_prefix)
            .field("token_set", &self.token_set)
            .field("n", &self.n)
            .field("weighting", &self.weighting)
            .field("transposition_cost", &self.transposition_cost)
            .field("secondary_metric", &self.secondary_metric)
            .field("tau", &self.tau)
            .finish()
    }
}

impl ResolvedOptions {
    /// Options used to score a bare token pair with a secondary metric.
    ///
    /// Outer normalization and tokenization policy does not apply; algorithm
    /// parameters and the length mode carry over.
    #[must_use]
    pub fn for_secondary(&self) -> ResolvedOptions {
        ResolvedOptions {
            granularity: Granularity::Character,
            case_sensitive: true,
            normalize_whitespace: false,
            strip_punctuation: false,
            threshold: 0.0,
            tokenizer: None,
            secondary_metric: None,
            ..self.clone()
        }
    }
}

fn finite(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimilarityError::invalid(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

fn clamp_f64(value: f64, lo: f64, hi: f64, name: &str) -> Result<f64> {
    let value = finite(value, name)?;
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        log::warn!("{} {} clamped to [{}, {}]", name, value, lo, hi);
    }
    Ok(clamped)
}

fn floor_usize(value: i64, floor: i64, name: &str) -> usize {
    if value < floor {
        log::warn!("{} {} raised to {}", name, value, floor);
    }
    usize::try_from(value.max(floor)).unwrap_or(usize::MAX)
}

/// Resolve caller options for `algorithm` under the ambient length `mode`.
///
/// # Errors
///
/// Returns [`SimilarityError::InvalidArgument`] for an unknown granularity or
/// weighting, a composite or unknown secondary metric, or a non-finite number.
pub fn resolve(
    algorithm: Algorithm,
    overrides: &SimilarityOptions,
    mode: LengthMode,
) -> Result<ResolvedOptions> {
    let merged = SimilarityOptions::global_defaults()
        .merged_with(&SimilarityOptions::algorithm_defaults(algorithm))
        .merged_with(overrides);

    let granularity: Granularity = merged.granularity.as_deref().unwrap_or("token").parse()?;
    let weighting: Weighting = merged.weighting.as_deref().unwrap_or("tf").parse()?;
    let secondary_metric = merged
        .secondary_metric
        .as_deref()
        .map(str::parse::<PrimitiveAlgorithm>)
        .transpose()?;

    let resolved = ResolvedOptions {
        granularity,
        case_sensitive: merged.case_sensitive.unwrap_or(false),
        normalize_whitespace: merged.normalize_whitespace.unwrap_or(true),
        strip_punctuation: merged
            .strip_punctuation
            .unwrap_or(granularity != Granularity::Character),
        threshold: clamp_f64(merged.threshold.unwrap_or(0.0), 0.0, 1.0, "threshold")?,
        mode,
        tokenizer: merged.tokenizer,
        prefix_scale: finite(merged.prefix_scale.unwrap_or(0.1), "prefix_scale")?,
        prefix_limit: floor_usize(merged.prefix_limit.unwrap_or(4), 0, "prefix_limit"),
        weight_common_prefix: clamp_f64(
            merged.weight_common_prefix.unwrap_or(0.0),
            0.0,
            f64::MAX,
            "weight_common_prefix",
        )?,
        token_set: merged.token_set.unwrap_or(true),
        n: floor_usize(merged.n.unwrap_or(2), 1, "n"),
        weighting,
        transposition_cost: floor_usize(
            merged.transposition_cost.unwrap_or(1),
            0,
            "transposition_cost",
        ),
        secondary_metric,
        tau: clamp_f64(merged.tau.unwrap_or(0.0), 0.0, 1.0, "tau")?,
    };

    log::trace!("resolved options for {}: {:?}", algorithm, resolved);
    Ok(resolved)
}
