//! Tokenization and character splitting
//!
//! Produces the [`PreparedInput`] each algorithm consumes: the normalized
//! string, its tokens, and its characters.

use super::ngram::NGRAM_SEPARATOR;
use super::normalize::normalize;
use crate::error::{Result, SimilarityError};
use crate::options::{Granularity, LengthMode, ResolvedOptions};
use unicode_segmentation::UnicodeSegmentation;

/// One side of a comparison, derived from a raw string and resolved options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInput {
    normalized: String,
    tokens: Vec<String>,
    characters: Vec<String>,
}

impl PreparedInput {
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    /// Prepare a bare string whose normalization is already final and whose
    /// tokens are its characters. Used for secondary-metric token pairs.
    pub(crate) fn from_characters(text: &str, mode: LengthMode) -> Self {
        let characters = split_characters(text, mode);
        PreparedInput {
            normalized: text.to_string(),
            tokens: characters.clone(),
            characters,
        }
    }
}

/// Normalize, tokenize, and split `raw` under `opts`.
///
/// # Errors
///
/// Fails only when a custom tokenizer returns malformed tokens.
pub fn prepare(raw: &str, opts: &ResolvedOptions) -> Result<PreparedInput> {
    let normalized = normalize(raw, opts);
    let tokens = tokenize(&normalized, opts)?;
    let characters = split_characters(&normalized, opts.mode);
    Ok(PreparedInput {
        normalized,
        tokens,
        characters,
    })
}

/// Split normalized text into tokens.
///
/// A custom tokenizer takes precedence over the granularity setting. Its
/// empty tokens are dropped; tokens holding the reserved n-gram separator
/// are rejected.
pub fn tokenize(normalized: &str, opts: &ResolvedOptions) -> Result<Vec<String>> {
    if let Some(tokenizer) = &opts.tokenizer {
        let tokens = tokenizer(normalized, opts);
        return validate_custom_tokens(tokens, opts.case_sensitive);
    }

    Ok(match opts.granularity {
        Granularity::Character => split_characters(normalized, opts.mode),
        Granularity::Word => word_runs(normalized),
        Granularity::Token => normalized.split_whitespace().map(str::to_string).collect(),
    })
}

fn validate_custom_tokens(tokens: Vec<String>, case_sensitive: bool) -> Result<Vec<String>> {
    if let Some(bad) = tokens.iter().find(|t| t.contains(NGRAM_SEPARATOR)) {
        return Err(SimilarityError::invalid(format!(
            "custom tokenizer returned token {:?} containing reserved character U+E000",
            bad
        )));
    }
    let before = tokens.len();
    let tokens: Vec<String> = tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(|t| if case_sensitive { t } else { t.to_lowercase() })
        .collect();
    if tokens.len() < before {
        log::trace!("dropped {} empty custom tokens", before - tokens.len());
    }
    Ok(tokens)
}

/// Maximal runs of letters and digits; everything else separates.
#[must_use]
pub fn word_runs(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|run| !run.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split text into atomic units under `mode`.
///
/// `Bytes` mode yields one slice per scalar value so that every slice stays
/// valid UTF-8; byte-level measurement happens in the algorithms that need it.
#[must_use]
pub fn split_characters(text: &str, mode: LengthMode) -> Vec<String> {
    match mode {
        LengthMode::Graphemes => text.graphemes(true).map(str::to_string).collect(),
        LengthMode::Codepoints | LengthMode::Bytes => text.chars().map(String::from).collect(),
    }
}

/// Length of `text` measured under `mode`
#[must_use]
pub fn measure(text: &str, mode: LengthMode) -> usize {
    match mode {
        LengthMode::Bytes => text.len(),
        LengthMode::Codepoints => text.chars().count(),
        LengthMode::Graphemes => text.graphemes(true).count(),
    }
}
