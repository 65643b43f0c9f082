//! N-gram construction over token or character sequences
//!
//! Window members are joined with a private-use separator so that
//! multi-unit n-grams never collide with real content.

/// Separator joining the members of an n-gram (Unicode private use area)
pub const NGRAM_SEPARATOR: char = '\u{E000}';

/// Build n-grams of size `n` from `units`.
///
/// - `n <= 1` or fewer than two units: the sequence is returned unchanged
/// - fewer units than `n`: a single n-gram of the whole sequence
/// - otherwise `len - n + 1` sliding windows
#[must_use]
pub fn build_ngrams<S: AsRef<str>>(units: &[S], n: usize) -> Vec<String> {
    if n <= 1 || units.len() <= 1 {
        return units.iter().map(|u| u.as_ref().to_string()).collect();
    }
    if units.len() < n {
        return vec![join_window(units)];
    }
    units.windows(n).map(join_window).collect()
}

fn join_window<S: AsRef<str>>(window: &[S]) -> String {
    let mut gram = String::new();
    for (i, unit) in window.iter().enumerate() {
        if i > 0 {
            gram.push(NGRAM_SEPARATOR);
        }
        gram.push_str(unit.as_ref());
    }
    gram
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep(parts: &[&str]) -> String {
        parts.join(&NGRAM_SEPARATOR.to_string())
    }

    #[test]
    fn test_sliding_windows() {
        let grams = build_ngrams(&["a", "b", "c", "d"], 2);
        assert_eq!(grams, vec![sep(&["a", "b"]), sep(&["b", "c"]), sep(&["c", "d"])]);
    }

    #[test]
    fn test_short_sequence_single_gram() {
        assert_eq!(build_ngrams(&["a", "b"], 3), vec![sep(&["a", "b"])]);
    }

    #[test]
    fn test_unchanged_cases() {
        assert_eq!(build_ngrams(&["only"], 3), vec!["only".to_string()]);
        assert_eq!(build_ngrams(&["a", "b"], 1), vec!["a".to_string(), "b".to_string()]);
        assert!(build_ngrams::<&str>(&[], 2).is_empty());
    }

    #[test]
    fn test_exact_length_window() {
        assert_eq!(build_ngrams(&["x", "y", "z"], 3), vec![sep(&["x", "y", "z"])]);
    }
}
