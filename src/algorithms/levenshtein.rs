//! Levenshtein (edit) distance implementation
//!
//! Optimized with:
//! - Myers bit-parallel algorithm for patterns up to 64 units
//! - Single-row DP fallback for longer patterns
//! - Generic units so bytes, codepoints, and grapheme clusters share one path

use crate::options::LengthMode;
use ahash::AHashMap;
use smallvec::SmallVec;
use std::hash::Hash;
use unicode_segmentation::UnicodeSegmentation;

/// Maximum pattern length for Myers bit-parallel algorithm (64 bits per block)
const MYERS_BLOCK_SIZE: usize = 64;

/// Myers bit-parallel Levenshtein distance for patterns up to 64 units.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
#[inline]
fn myers_64<T: Hash + Eq>(pattern: &[T], text: &[T]) -> usize {
    let m = pattern.len();
    let n = text.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }
    if m > MYERS_BLOCK_SIZE {
        return dp_distance(pattern, text);
    }

    // Peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<&T, u64> = AHashMap::with_capacity(m.min(26));
    for (i, unit) in pattern.iter().enumerate() {
        *peq.entry(unit).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;

    let mask = 1u64 << (m - 1);

    for unit in text {
        let eq = peq.get(unit).copied().unwrap_or(0);

        let xv = eq | vn;
        let eq_and_vp = eq & vp;
        let xh = ((eq_and_vp.wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        // First row is 0,1,2,3... so the shifted-in horizontal delta is +1
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    score
}

/// Standard single-row DP distance (fallback for long patterns)
#[inline]
fn dp_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Ensure shorter sequence is on the column axis
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = if *sc == target[j] { 0 } else { 1 };
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Edit distance between two unit sequences.
///
/// # Complexity
/// - Time: O(⌈m/64⌉n) when the shorter side fits in 64 units, O(m*n) otherwise
/// - Space: O(min(m,n))
#[must_use]
pub fn levenshtein_distance_units<T: Hash + Eq>(a: &[T], b: &[T]) -> usize {
    if a == b {
        return 0;
    }
    // Shorter sequence as the Myers pattern
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    myers_64(pattern, text)
}

/// Normalized similarity `1 - d / max(len)` over unit sequences
#[must_use]
pub fn levenshtein_similarity_units<T: Hash + Eq>(a: &[T], b: &[T]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance_units(a, b) as f64 / max_len as f64
}

/// Edit distance between two strings with lengths measured under `mode`
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str, mode: LengthMode) -> usize {
    match mode {
        LengthMode::Bytes => levenshtein_distance_units(a.as_bytes(), b.as_bytes()),
        LengthMode::Codepoints => {
            let a_chars: SmallVec<[char; 64]> = a.chars().collect();
            let b_chars: SmallVec<[char; 64]> = b.chars().collect();
            levenshtein_distance_units(&a_chars, &b_chars)
        }
        LengthMode::Graphemes => {
            let a_graphemes: SmallVec<[&str; 64]> = a.graphemes(true).collect();
            let b_graphemes: SmallVec<[&str; 64]> = b.graphemes(true).collect();
            levenshtein_distance_units(&a_graphemes, &b_graphemes)
        }
    }
}

/// Normalized Levenshtein similarity with lengths measured under `mode`.
///
/// Two empty strings score 1.0; one empty side scores 0.0.
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str, mode: LengthMode) -> f64 {
    match mode {
        LengthMode::Bytes => levenshtein_similarity_units(a.as_bytes(), b.as_bytes()),
        LengthMode::Codepoints => {
            let a_chars: SmallVec<[char; 64]> = a.chars().collect();
            let b_chars: SmallVec<[char; 64]> = b.chars().collect();
            levenshtein_similarity_units(&a_chars, &b_chars)
        }
        LengthMode::Graphemes => {
            let a_graphemes: SmallVec<[&str; 64]> = a.graphemes(true).collect();
            let b_graphemes: SmallVec<[&str; 64]> = b.graphemes(true).collect();
            levenshtein_similarity_units(&a_graphemes, &b_graphemes)
        }
    }
}
