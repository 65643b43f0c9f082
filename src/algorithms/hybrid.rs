//! Token-level hybrid measures: Monge-Elkan and Soft-TFIDF
//!
//! Both compare every token of one side against every token of the other with
//! a [`SecondaryMetric`], then aggregate the best match per token.
//!
//! # Complexity
//! - Time: O(|A| * |B|) secondary evaluations over distinct tokens
//! - Space: O(|A| * |B|) for the pairwise score table

use super::tokenize::PreparedInput;
use super::weighting::{weigh, TermCounts, WeightVector, Weighting};
use super::PrimitiveAlgorithm;
use crate::engine;
use crate::options::ResolvedOptions;

/// A primitive algorithm applied to bare token pairs.
///
/// Outer normalization and tokenization never reach the secondary metric: it
/// sees each token as already-normalized text split into characters.
#[derive(Debug, Clone)]
pub struct SecondaryMetric {
    metric: PrimitiveAlgorithm,
    opts: ResolvedOptions,
}

impl SecondaryMetric {
    pub fn new(metric: PrimitiveAlgorithm, outer: &ResolvedOptions) -> Self {
        SecondaryMetric {
            metric,
            opts: outer.for_secondary(),
        }
    }

    pub fn metric(&self) -> PrimitiveAlgorithm {
        self.metric
    }

    /// Score one token pair, clamped to `[0, 1]`
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let left = PreparedInput::from_characters(a, self.opts.mode);
        let right = PreparedInput::from_characters(b, self.opts.mode);
        self.score_prepared(&left, &right)
    }

    fn score_prepared(&self, a: &PreparedInput, b: &PreparedInput) -> f64 {
        let raw = engine::score_primitive(self.metric, a, b, &self.opts);
        engine::finalize(raw, 0.0)
    }

    /// Scores of every `from` term against every `to` term, row per `from` term
    fn pairwise(&self, from: &[PreparedInput], to: &[PreparedInput]) -> Vec<Vec<f64>> {
        from.iter()
            .map(|a| to.iter().map(|b| self.score_prepared(a, b)).collect())
            .collect()
    }

    fn prepare_terms(&self, counts: &TermCounts<'_>) -> Vec<PreparedInput> {
        counts
            .iter()
            .map(|(term, _)| PreparedInput::from_characters(term, self.opts.mode))
            .collect()
    }
}

/// Distinct tokens of both sides plus the directional score tables.
struct PairTable<'a> {
    left: TermCounts<'a>,
    right: TermCounts<'a>,
    /// `forward[i][j]` = secondary(left_i, right_j)
    forward: Vec<Vec<f64>>,
    /// `backward[j][i]` = secondary(right_j, left_i)
    backward: Vec<Vec<f64>>,
}

impl<'a> PairTable<'a> {
    fn build<S: AsRef<str>>(a: &'a [S], b: &'a [S], secondary: &SecondaryMetric) -> Self {
        let left = TermCounts::from_terms(a.iter().map(AsRef::as_ref));
        let right = TermCounts::from_terms(b.iter().map(AsRef::as_ref));
        let left_prepared = secondary.prepare_terms(&left);
        let right_prepared = secondary.prepare_terms(&right);
        let forward = secondary.pairwise(&left_prepared, &right_prepared);
        let backward = secondary.pairwise(&right_prepared, &left_prepared);
        PairTable {
            left,
            right,
            forward,
            backward,
        }
    }
}

fn row_max(row: &[f64]) -> f64 {
    row.iter().copied().fold(0.0, f64::max)
}

/// Average best-match score of every `from` token, duplicates included.
fn directional_mean(from: &TermCounts<'_>, scores: &[Vec<f64>], tau: f64) -> f64 {
    let total = from.total();
    if total == 0 {
        return 0.0;
    }
    let sum: f64 = from
        .iter()
        .zip(scores)
        .map(|((_, count), row)| {
            let best = row_max(row);
            if best >= tau {
                best * count as f64
            } else {
                0.0
            }
        })
        .sum();
    sum / total as f64
}

/// Monge-Elkan similarity, symmetrized.
///
/// Each direction averages, over its tokens, the best secondary score against
/// the other side; best scores below `tau` count as 0. The result is the mean
/// of the two directions.
pub fn monge_elkan_similarity<S: AsRef<str>>(
    a: &[S],
    b: &[S],
    secondary: &SecondaryMetric,
    tau: f64,
) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let table = PairTable::build(a, b, secondary);
    let forward = directional_mean(&table.left, &table.forward, tau);
    let backward = directional_mean(&table.right, &table.backward, tau);
    (forward + backward) / 2.0
}

/// One direction of Soft-TFIDF.
///
/// Every `from` term is paired with its best-scoring `to` term (ties go to
/// the heavier `to` term). Pairs scoring below `tau` contribute nothing.
fn soft_direction(from: &WeightVector<'_>, to: &WeightVector<'_>, scores: &[Vec<f64>], tau: f64) -> f64 {
    let denominator = from.norm() * to.norm();
    if denominator == 0.0 {
        return 0.0;
    }

    let to_weights: Vec<f64> = to.iter().map(|(_, w)| w).collect();
    let mut sum = 0.0;

    for ((_, from_weight), row) in from.iter().zip(scores) {
        let mut best: Option<(f64, f64)> = None;
        for (&score, &to_weight) in row.iter().zip(&to_weights) {
            let better = match best {
                None => true,
                Some((best_score, best_weight)) => {
                    score > best_score || (score == best_score && to_weight > best_weight)
                }
            };
            if better {
                best = Some((score, to_weight));
            }
        }
        if let Some((score, to_weight)) = best {
            if score > 0.0 && score >= tau {
                sum += from_weight * to_weight * score;
            }
        }
    }

    (sum / denominator).min(1.0)
}

/// Soft-TFIDF similarity, symmetrized.
///
/// Distinct tokens are weighted by tfidf over the two-document corpus; each
/// direction sums `w_a * w_b * best` over close matches (best ≥ `tau`) and
/// divides by the product of the vector norms. The two directions are averaged.
pub fn soft_tfidf_similarity<S: AsRef<str>>(
    a: &[S],
    b: &[S],
    secondary: &SecondaryMetric,
    tau: f64,
) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let table = PairTable::build(a, b, secondary);
    let left_weights = weigh(&table.left, &table.right, Weighting::TfIdf);
    let right_weights = weigh(&table.right, &table.left, Weighting::TfIdf);

    let forward = soft_direction(&left_weights, &right_weights, &table.forward, tau);
    let backward = soft_direction(&right_weights, &left_weights, &table.backward, tau);
    (forward + backward) / 2.0
}
