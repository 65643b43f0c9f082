//! Jaro and Jaro-Winkler similarity implementations
//!
//! Excellent for names and short strings.
//! Jaro-Winkler gives extra weight to common prefixes.

use smallvec::SmallVec;

/// Jaro similarity over unit sequences.
///
/// Units match when equal and no further apart than `⌊max(len)/2⌋ - 1`;
/// transpositions are counted by halves. Greedy matching is run with each
/// side leading and the higher score kept, so argument order never matters.
///
/// # Complexity
/// - Time: O(m*n) worst case, O(m*w) with match window w
/// - Space: O(m+n) for match flags
#[must_use]
pub fn jaro_similarity<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    jaro_directional(a, b).max(jaro_directional(b, a))
}

/// Jaro with `a` claiming matches greedily, left to right
fn jaro_directional<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 && b_len == 0 {
        return 1.0;
    }
    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    // Match window size
    let match_distance = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut a_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; a_len];
    let mut b_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; b_len];

    let mut matches = 0usize;

    for i in 0..a_len {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b_len);

        for j in start..end {
            if b_matched[j] || a[i] != b[j] {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Count transpositions
    let mut transpositions = 0usize;
    let mut k = 0usize;
    for i in 0..a_len {
        if !a_matched[i] {
            continue;
        }
        while k < b_len && !b_matched[k] {
            k += 1;
        }
        if k >= b_len {
            break;
        }
        if a[i] != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    (m / a_len as f64 + m / b_len as f64 + (m - transpositions as f64 / 2.0) / m) / 3.0
}

/// Length of the common prefix, capped at `limit` units
#[inline]
#[must_use]
pub fn common_prefix_units<T: PartialEq>(a: &[T], b: &[T], limit: usize) -> usize {
    a.iter()
        .zip(b.iter())
        .take(limit)
        .take_while(|(x, y)| x == y)
        .count()
}

/// Jaro-Winkler similarity: `j + l * p * (1 - j)`.
///
/// `l` is the common prefix length up to `prefix_limit` units and `p` is
/// `prefix_scale`. Scales above 0.25 with long prefixes can push the raw
/// value past 1.0; callers clamp.
#[must_use]
pub fn jaro_winkler_similarity<T: PartialEq>(
    a: &[T],
    b: &[T],
    prefix_scale: f64,
    prefix_limit: usize,
) -> f64 {
    let jaro_sim = jaro_similarity(a, b);

    if jaro_sim == 0.0 {
        return 0.0;
    }

    let prefix_len = common_prefix_units(a, b, prefix_limit);
    jaro_sim + (prefix_len as f64 * prefix_scale * (1.0 - jaro_sim))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn jaro(a: &str, b: &str) -> f64 {
        jaro_similarity(&chars(a), &chars(b))
    }

    fn jw(a: &str, b: &str) -> f64 {
        jaro_winkler_similarity(&chars(a), &chars(b), 0.1, 4)
    }

    #[test]
    fn test_jaro_basic() {
        assert!(approx_eq(jaro("", ""), 1.0));
        assert!(approx_eq(jaro("abc", "abc"), 1.0));
        assert!(approx_eq(jaro("abc", "xyz"), 0.0));
        assert!(approx_eq(jaro("abc", ""), 0.0));
    }

    #[test]
    fn test_jaro_examples() {
        // Classic examples
        assert!(approx_eq(jaro("MARTHA", "MARHTA"), 0.944));
        assert!(approx_eq(jaro("DWAYNE", "DUANE"), 0.822));
        assert!(approx_eq(jaro("hello", "hallo"), 0.866));
    }

    #[test]
    fn test_jaro_winkler_examples() {
        assert!(approx_eq(jw("MARTHA", "MARHTA"), 0.961));
        assert!(approx_eq(jw("DWAYNE", "DUANE"), 0.84));
        assert!(approx_eq(jw("DIXON", "DICKSONX"), 0.813));
    }

    #[test]
    fn test_jaro_winkler_boost() {
        assert!(jw("MARTHA", "MARHTA") > jaro("MARTHA", "MARHTA"));
    }

    #[test]
    fn test_prefix_limit_zero_is_plain_jaro() {
        let a = chars("prefix");
        let b = chars("prefab");
        assert!(approx_eq(
            jaro_winkler_similarity(&a, &b, 0.1, 0),
            jaro_similarity(&a, &b)
        ));
    }

    #[test]
    fn test_grapheme_units() {
        let a = ["e\u{0301}", "t", "e"];
        let b = ["e\u{0301}", "t", "e"];
        assert!(approx_eq(jaro_similarity(&a, &b), 1.0));
    }

    #[test]
    fn test_argument_order_never_matters() {
        let words = ["abcab", "bacba", "aabbc", "cabba", "abcabc", "ab", "ba", "abc"];
        for a in words {
            for b in words {
                assert_eq!(jaro(a, b), jaro(b, a), "{} / {}", a, b);
                assert_eq!(jw(a, b), jw(b, a), "{} / {}", a, b);
            }
        }
    }

    #[test]
    fn test_symmetric_examples() {
        for (a, b) in [("MARTHA", "MARHTA"), ("crate", "trace"), ("dixon", "dicksonx")] {
            assert!(approx_eq(jw(a, b), jw(b, a)));
        }
    }
}
