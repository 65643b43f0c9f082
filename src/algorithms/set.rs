//! Token overlap measures: Jaccard and Sørensen-Dice
//!
//! Both come in a set flavor (distinct tokens only) and a multiset flavor
//! where each token contributes `min`/`max` of its counts on the two sides.

use super::weighting::TermCounts;

/// Jaccard similarity of two token sequences.
///
/// Set mode: `|A ∩ B| / |A ∪ B|`.
/// Multiset mode: `Σ min(countA, countB) / Σ max(countA, countB)`.
#[must_use]
pub fn jaccard_similarity<S: AsRef<str>>(a: &[S], b: &[S], token_set: bool) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_counts = TermCounts::from_terms(a.iter().map(AsRef::as_ref));
    let b_counts = TermCounts::from_terms(b.iter().map(AsRef::as_ref));
    let (intersection, union) = overlap(&a_counts, &b_counts, token_set);

    if union == 0 {
        1.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Sørensen-Dice coefficient of two token sequences.
///
/// Set mode: `2|A ∩ B| / (|A| + |B|)` over distinct tokens.
/// Multiset mode: `2 Σ min(count) / (Σ countA + Σ countB)`.
#[must_use]
pub fn sorensen_dice_similarity<S: AsRef<str>>(a: &[S], b: &[S], token_set: bool) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_counts = TermCounts::from_terms(a.iter().map(AsRef::as_ref));
    let b_counts = TermCounts::from_terms(b.iter().map(AsRef::as_ref));
    let (intersection, _) = overlap(&a_counts, &b_counts, token_set);

    let denominator = if token_set {
        a_counts.len() + b_counts.len()
    } else {
        a_counts.total() + b_counts.total()
    };

    (2.0 * intersection as f64) / denominator as f64
}

/// Intersection and union sizes, as sets or as multisets.
fn overlap(a: &TermCounts<'_>, b: &TermCounts<'_>, token_set: bool) -> (usize, usize) {
    if token_set {
        let intersection = a.iter().filter(|(term, _)| b.contains(term)).count();
        return (intersection, a.len() + b.len() - intersection);
    }

    let mut intersection = 0usize;
    let mut union = 0usize;
    for (term, a_count) in a.iter() {
        let b_count = b.get(term);
        intersection += a_count.min(b_count);
        union += a_count.max(b_count);
    }
    for (term, b_count) in b.iter() {
        if !a.contains(term) {
            union += b_count;
        }
    }
    (intersection, union)
}
