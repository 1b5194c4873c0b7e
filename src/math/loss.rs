//! Loss and prediction primitives over raw model scores.
//!
//! Scores are unnormalized logits; cross-entropy goes through a shifted
//! log-sum-exp so large magnitudes cannot overflow.

use ndarray::ArrayView1;

/// Per-sample cross-entropy loss of a score row against the true label.
///
/// Computes `log(sum_j exp(s_j)) - s_label` with the max subtracted first
/// for numerical stability.
pub fn cross_entropy(scores: ArrayView1<'_, f32>, label: usize) -> f32 {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let lse: f32 = scores.iter().map(|&s| (s - max).exp()).sum::<f32>().ln();
    lse - (scores[label] - max)
}

/// Index of the maximum score; ties resolve to the lowest class index.
pub fn argmax(scores: ArrayView1<'_, f32>) -> usize {
    let mut best = 0;
    let mut best_score = f32::NEG_INFINITY;
    for (i, &s) in scores.iter().enumerate() {
        if s > best_score {
            best_score = s;
            best = i;
        }
    }
    best
}
