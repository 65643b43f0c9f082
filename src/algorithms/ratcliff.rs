//! Ratcliff-Obershelp (gestalt pattern matching) similarity
//!
//! Finds the longest common contiguous run, then repeats on the unmatched
//! regions to its left and right. The score is `2 * matched / (len(a) + len(b))`.

/// Location of a common run: start in `a`, start in `b`, length
type Run = (usize, usize, usize);

/// Longest common contiguous run of `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
///
/// Ties go to the run that starts earliest in `a`, then earliest in `b`.
fn longest_common_run<T: PartialEq>(
    a: &[T],
    b: &[T],
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> Run {
    let width = b_hi - b_lo;
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];
    let mut best: Run = (a_lo, b_lo, 0);

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            let col = j - b_lo + 1;
            if a[i] == b[j] {
                curr[col] = prev[col - 1] + 1;
                let len = curr[col];
                let start_a = i + 1 - len;
                let start_b = j + 1 - len;
                if len > best.2 || (len == best.2 && len > 0 && (start_a, start_b) < (best.0, best.1)) {
                    best = (start_a, start_b, len);
                }
            } else {
                curr[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Total number of units matched by recursive longest-run decomposition.
///
/// Tied runs can be picked differently depending on which side leads, so
/// the decomposition runs with each side leading and the larger count wins.
/// The result does not depend on argument order.
#[must_use]
pub fn ratcliff_obershelp_matches<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    decompose(a, b).max(decompose(b, a))
}

/// Matched units with ties resolved toward the earliest run in `a`
fn decompose<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut matched = 0;
    // Explicit work stack of (a range, b range) regions
    let mut regions = vec![((0, a.len()), (0, b.len()))];

    while let Some((a_range, b_range)) = regions.pop() {
        if a_range.0 >= a_range.1 || b_range.0 >= b_range.1 {
            continue;
        }
        let (i, j, len) = longest_common_run(a, b, a_range, b_range);
        if len == 0 {
            continue;
        }
        matched += len;
        regions.push(((a_range.0, i), (b_range.0, j)));
        regions.push(((i + len, a_range.1), (j + len, b_range.1)));
    }

    matched
}

/// Ratcliff-Obershelp similarity over unit sequences
#[must_use]
pub fn ratcliff_obershelp_similarity<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    2.0 * ratcliff_obershelp_matches(a, b) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_longest_run() {
        let a = chars("xabcdy");
        let b = chars("zzabcd");
        assert_eq!(longest_common_run(&a, &b, (0, 6), (0, 6)), (1, 2, 4));
    }

    #[test]
    fn test_wikipedia_example() {
        // WIKIMEDIA vs WIKIMANIA: "WIKIM" + "IA" = 7 matched
        let a = chars("WIKIMEDIA");
        let b = chars("WIKIMANIA");
        assert_eq!(ratcliff_obershelp_matches(&a, &b), 7);
        assert!((ratcliff_obershelp_similarity(&a, &b) - 14.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_token_units() {
        let a = ["new", "york", "city"];
        let b = ["york", "city", "new"];
        assert_eq!(ratcliff_obershelp_matches(&a, &b), 2);
    }

    #[test]
    fn test_tied_runs_are_order_independent() {
        let a = ["a", "a", "a", "a", "a", "b"];
        let b = ["a", "b", "a", "a", "c", "a"];
        // "a b" first leaves nothing on one side; "a a" then "a" matches 3
        assert_eq!(decompose(&b, &a), 2);
        assert_eq!(ratcliff_obershelp_matches(&a, &b), 3);
        assert_eq!(ratcliff_obershelp_matches(&b, &a), 3);
        assert_eq!(
            ratcliff_obershelp_similarity(&a, &b),
            ratcliff_obershelp_similarity(&b, &a)
        );
    }

    #[test]
    fn test_edges() {
        let empty: [char; 0] = [];
        assert_eq!(ratcliff_obershelp_similarity(&empty, &empty), 1.0);
        assert_eq!(ratcliff_obershelp_similarity(&chars("a"), &empty), 0.0);
        assert_eq!(ratcliff_obershelp_similarity(&chars("abc"), &chars("xyz")), 0.0);
        assert_eq!(ratcliff_obershelp_similarity(&chars("same"), &chars("same")), 1.0);
    }
}
