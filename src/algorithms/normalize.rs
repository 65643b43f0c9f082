//! Text normalization applied before tokenization
//!
//! Steps run in a fixed order: case-fold, punctuation stripping, whitespace
//! collapsing. Each step is individually switchable.

use crate::options::ResolvedOptions;
use unicode_normalization::char::is_combining_mark;

/// Normalization switches, usually taken from [`ResolvedOptions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationSteps {
    pub case_fold: bool,
    pub strip_punctuation: bool,
    pub collapse_whitespace: bool,
}

impl From<&ResolvedOptions> for NormalizationSteps {
    fn from(opts: &ResolvedOptions) -> Self {
        Self {
            case_fold: !opts.case_sensitive,
            strip_punctuation: opts.strip_punctuation,
            collapse_whitespace: opts.normalize_whitespace,
        }
    }
}

/// Punctuation and symbols: anything that is not a letter, digit, whitespace,
/// or combining mark.
#[inline]
fn is_punctuation_or_symbol(c: char) -> bool {
    !(c.is_alphanumeric() || c.is_whitespace() || is_combining_mark(c))
}

/// Normalize a string according to the given steps
#[must_use]
pub fn normalize_string(s: &str, steps: NormalizationSteps) -> String {
    let mut out = if steps.case_fold {
        s.to_lowercase()
    } else {
        s.to_string()
    };

    if steps.strip_punctuation {
        out = out
            .chars()
            .map(|c| if is_punctuation_or_symbol(c) { ' ' } else { c })
            .collect();
    }

    if steps.collapse_whitespace {
        out = out.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    out
}

/// Normalize a string under resolved options
#[inline]
#[must_use]
pub fn normalize(s: &str, opts: &ResolvedOptions) -> String {
    normalize_string(s, NormalizationSteps::from(opts))
}
