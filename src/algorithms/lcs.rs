//! Longest Common Subsequence (LCS) based similarity
//!
//! Two scorers share the LCS-length dynamic program:
//! - `lcs-myers`: Dice-style LCS ratio with an optional leading-run bonus,
//!   capped at 1.0
//! - `github-style`: the same ratio plus a leading-run bonus that is left
//!   uncapped here; the engine clamps the final score
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(n), only the current and previous rows are kept

use super::jaro::common_prefix_units;

/// Calculate the length of the Longest Common Subsequence of two unit sequences.
#[must_use]
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 || n == 0 {
        return 0;
    }

    let mut prev: Vec<usize> = vec![0; n + 1];
    let mut curr: Vec<usize> = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = 0;
        for j in 1..=n {
            if a[i - 1] == b[j - 1] {
                curr[j] = prev[j - 1] + 1;
            } else {
                curr[j] = prev[j].max(curr[j - 1]);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// `2 * LCS / (len(a) + len(b))`, with 1.0 for two empty sequences
#[must_use]
pub fn lcs_ratio<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2.0 * lcs_length(a, b) as f64) / total as f64
}

/// LCS ratio plus `weight_common_prefix * prefix / max(len)`, capped at 1.0.
///
/// `prefix` is the length of the matching leading run of units.
#[must_use]
pub fn lcs_myers_similarity<T: PartialEq>(a: &[T], b: &[T], weight_common_prefix: f64) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let base = lcs_ratio(a, b);
    if weight_common_prefix <= 0.0 {
        return base;
    }

    let prefix = common_prefix_units(a, b, usize::MAX);
    let max_len = a.len().max(b.len()) as f64;
    (base + weight_common_prefix * prefix as f64 / max_len).min(1.0)
}

/// LCS ratio plus `min(prefix, prefix_limit) * prefix_scale`.
///
/// The bonus is not capped here, so the raw value may exceed 1.0.
#[must_use]
pub fn github_style_similarity<T: PartialEq>(
    a: &[T],
    b: &[T],
    prefix_scale: f64,
    prefix_limit: usize,
) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let prefix = common_prefix_units(a, b, prefix_limit);
    lcs_ratio(a, b) + prefix as f64 * prefix_scale
}
