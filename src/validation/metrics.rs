//! Per-class metric accumulation and report types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-class metric breakdown: cumulative value, per-example rate, and
/// retained sample count for every class label.
///
/// All classes `0..num_classes` are present. The per-example rate of a
/// class with zero retained samples is NaN, its cumulative value 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerClassReport {
    /// Cumulative value per class (loss sum or correct count)
    pub cumulative: BTreeMap<usize, f64>,
    /// Per-example rate per class (NaN when the class has no samples)
    pub per_example: BTreeMap<usize, f64>,
    /// Retained sample count per class
    pub counts: BTreeMap<usize, usize>,
}

impl PerClassReport {
    /// Retained sample count for a class (0 for unknown classes).
    pub fn count(&self, class: usize) -> usize {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    /// Cumulative value for a class (0.0 for unknown classes).
    pub fn cumulative(&self, class: usize) -> f64 {
        self.cumulative.get(&class).copied().unwrap_or(0.0)
    }

    /// Per-example rate for a class (NaN for unknown classes).
    pub fn per_example(&self, class: usize) -> f64 {
        self.per_example.get(&class).copied().unwrap_or(f64::NAN)
    }
}

/// Per-sample records for one class, appended in dataset order.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClassAccumulator {
    losses: Vec<f32>,
    correct: Vec<bool>,
}

/// Capped sums for one class after accumulation finishes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ClassSummary {
    pub count: usize,
    pub loss_sum: f64,
    pub correct_sum: f64,
}

impl ClassAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, loss: f32, correct: bool) {
        self.losses.push(loss);
        self.correct.push(correct);
    }

    /// Truncate to the first `cap` samples and sum what is retained.
    pub fn finalize(&self, cap: Option<usize>) -> ClassSummary {
        let retained = match cap {
            Some(cap) => cap.min(self.losses.len()),
            None => self.losses.len(),
        };
        ClassSummary {
            count: retained,
            loss_sum: self.losses[..retained].iter().map(|&l| l as f64).sum(),
            correct_sum: self.correct[..retained].iter().filter(|&&c| c).count() as f64,
        }
    }
}

/// Loss breakdown: cumulative loss sum, per-example mean loss, counts.
pub(crate) fn build_loss_report(summaries: &[ClassSummary]) -> PerClassReport {
    let mut report = PerClassReport {
        cumulative: BTreeMap::new(),
        per_example: BTreeMap::new(),
        counts: BTreeMap::new(),
    };
    for (class, s) in summaries.iter().enumerate() {
        report.cumulative.insert(class, s.loss_sum);
        let rate = if s.count == 0 {
            f64::NAN
        } else {
            s.loss_sum / s.count as f64
        };
        report.per_example.insert(class, rate);
        report.counts.insert(class, s.count);
    }
    report
}

/// Accuracy breakdown: cumulative correct count, per-example percentage,
/// counts.
pub(crate) fn build_accuracy_report(summaries: &[ClassSummary]) -> PerClassReport {
    let mut report = PerClassReport {
        cumulative: BTreeMap::new(),
        per_example: BTreeMap::new(),
        counts: BTreeMap::new(),
    };
    for (class, s) in summaries.iter().enumerate() {
        report.cumulative.insert(class, s.correct_sum);
        let rate = if s.count == 0 {
            f64::NAN
        } else {
            100.0 * s.correct_sum / s.count as f64
        };
        report.per_example.insert(class, rate);
        report.counts.insert(class, s.count);
    }
    report
}
