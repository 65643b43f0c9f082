//! Damerau-Levenshtein distance implementation
//!
//! Extends Levenshtein with adjacent transpositions. This is the "true"
//! (unrestricted) variant: a transposed pair may be edited further, which the
//! optimal-string-alignment variant does not allow.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(m*n) for the distance matrix plus O(alphabet) for the last-seen table

use ahash::AHashMap;
use std::hash::Hash;

/// True Damerau-Levenshtein distance over unit sequences.
///
/// Insertions, deletions, and substitutions cost 1; an adjacent transposition
/// costs `transposition_cost`. The matrix carries an extra border row and
/// column holding an "infinite" sentinel (`m + n` scaled by the costs), and a
/// table of the last row each unit of `a` was seen in.
#[must_use]
pub fn true_damerau_levenshtein<T: Hash + Eq>(a: &[T], b: &[T], transposition_cost: usize) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let infinity = (m + n).saturating_mul(transposition_cost.max(1));

    // Last row (1-based) in which each unit of `a` was seen
    let mut last_row: AHashMap<&T, usize> = AHashMap::new();

    let mut d: Vec<Vec<usize>> = vec![vec![0; n + 2]; m + 2];

    d[0][0] = infinity;
    for i in 0..=m {
        d[i + 1][0] = infinity;
        d[i + 1][1] = i;
    }
    for j in 0..=n {
        d[0][j + 1] = infinity;
        d[1][j + 1] = j;
    }

    for i in 1..=m {
        // Last column in this row where a[i-1] matched
        let mut last_match_col = 0usize;

        for j in 1..=n {
            let i1 = last_row.get(&b[j - 1]).copied().unwrap_or(0);
            let j1 = last_match_col;

            let cost = if a[i - 1] == b[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };

            let transposition = d[i1][j1]
                .saturating_add(i - i1 - 1)
                .saturating_add(transposition_cost)
                .saturating_add(j - j1 - 1);

            d[i + 1][j + 1] = (d[i][j] + cost) // substitution
                .min(d[i + 1][j] + 1) // insertion
                .min(d[i][j + 1] + 1) // deletion
                .min(transposition);
        }

        last_row.insert(&a[i - 1], i);
    }

    d[m + 1][n + 1]
}

/// Normalized similarity `1 - d / max(len)` using true Damerau-Levenshtein.
#[must_use]
pub fn damerau_levenshtein_similarity<T: Hash + Eq>(a: &[T], b: &[T], transposition_cost: usize) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    let dist = true_damerau_levenshtein(a, b, transposition_cost);
    (1.0 - dist as f64 / max_len as f64).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dl(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        true_damerau_levenshtein(&a, &b, 1)
    }

    #[test]
    fn test_damerau_basic() {
        assert_eq!(dl("", ""), 0);
        assert_eq!(dl("abc", "abc"), 0);
        assert_eq!(dl("ab", "ba"), 1);
        assert_eq!(dl("abc", "acb"), 1);
        assert_eq!(dl("abc", ""), 3);
    }

    #[test]
    fn test_transposition_vs_levenshtein() {
        // Levenshtein would give 2, Damerau gives 1
        assert_eq!(dl("ca", "ac"), 1);
    }

    #[test]
    fn test_unrestricted_variant() {
        // OSA gives 3 for both of these
        assert_eq!(dl("ca", "abc"), 2);
        assert_eq!(dl("00210000", "001020000"), 2);
    }

    #[test]
    fn test_night_nacht() {
        assert_eq!(dl("night", "nacht"), 2);
    }

    #[test]
    fn test_transposition_cost() {
        let a: Vec<char> = "ab".chars().collect();
        let b: Vec<char> = "ba".chars().collect();
        // Two substitutions beat a transposition costing 3
        assert_eq!(true_damerau_levenshtein(&a, &b, 3), 2);
        assert_eq!(true_damerau_levenshtein(&a, &b, 0), 0);
    }

    #[test]
    fn test_similarity() {
        let a: Vec<char> = "abcd".chars().collect();
        let b: Vec<char> = "abdc".chars().collect();
        assert!((damerau_levenshtein_similarity(&a, &b, 1) - 0.75).abs() < 1e-9);
        assert_eq!(damerau_levenshtein_similarity::<char>(&[], &[], 1), 1.0);
    }
}
