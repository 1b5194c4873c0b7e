//! Per-class validation of a trained model over a held-out set.
//!
//! Runs batch-sequential inference through the [`Classifier`] seam and
//! accumulates cross-entropy loss and correctness separately for every
//! class label, so class-targeted attacks surface as per-class anomalies
//! that an overall accuracy number would average away.

pub mod metrics;

pub use metrics::PerClassReport;

use log::debug;
use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::EvalSet;
use crate::error::PartaError;
use crate::math::{argmax, cross_entropy};
use crate::validation::metrics::{build_accuracy_report, build_loss_report, ClassAccumulator};

/// Default per-class sample cap for variance control.
pub const DEFAULT_PER_CLASS_CAP: usize = 30;

/// Default evaluation batch size.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Model inference seam: a batch of feature rows in, one row of raw
/// per-class scores per sample out.
///
/// Scores are unnormalized logits; the validator applies its own softmax
/// cross-entropy. Implementations may parallelize internally, but must
/// keep row order.
pub trait Classifier {
    /// Score a batch; output shape must be `(batch rows, num_classes)`.
    fn scores(&self, batch: ArrayView2<'_, f32>) -> Array2<f32>;
}

/// Which breakdown a validation pass reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMetric {
    /// Loss-per-class breakdown
    LossPerClass,
    /// Accuracy-per-class breakdown
    AccuracyPerClass,
    /// Overall accuracy plus the loss breakdown
    #[default]
    Combined,
}

impl ValidationMetric {
    /// Parse the metric strings used by experiment configs.
    ///
    /// `"LIPC"` selects loss-per-class, `"accuracy"` accuracy-per-class;
    /// any other or absent value falls back to [`ValidationMetric::Combined`].
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("LIPC") => ValidationMetric::LossPerClass,
            Some("accuracy") => ValidationMetric::AccuracyPerClass,
            _ => ValidationMetric::Combined,
        }
    }
}

/// Result of one validation pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ValidationReport {
    /// Loss-per-class breakdown
    LossPerClass(PerClassReport),
    /// Accuracy-per-class breakdown
    AccuracyPerClass(PerClassReport),
    /// Overall accuracy (percentage over all samples, computed before
    /// capping) plus the loss breakdown
    Combined {
        /// Overall accuracy percentage
        overall_accuracy: f64,
        /// Loss breakdown
        loss: PerClassReport,
    },
}

impl ValidationReport {
    /// The per-class breakdown carried by any report flavor.
    pub fn per_class(&self) -> &PerClassReport {
        match self {
            ValidationReport::LossPerClass(report) => report,
            ValidationReport::AccuracyPerClass(report) => report,
            ValidationReport::Combined { loss, .. } => loss,
        }
    }

    /// Overall accuracy, present only for [`ValidationReport::Combined`].
    pub fn overall_accuracy(&self) -> Option<f64> {
        match self {
            ValidationReport::Combined {
                overall_accuracy, ..
            } => Some(*overall_accuracy),
            _ => None,
        }
    }
}

/// Per-class validator over a held-out evaluation set.
///
/// # Example
///
/// ```rust
/// use ndarray::{Array2, ArrayView2};
/// use parta_fl::{Classifier, EvalSet, PerClassValidator, ValidationMetric};
///
/// struct Flat;
/// impl Classifier for Flat {
///     fn scores(&self, batch: ArrayView2<'_, f32>) -> Array2<f32> {
///         Array2::zeros((batch.nrows(), 2))
///     }
/// }
///
/// let features = Array2::zeros((4, 3));
/// let set = EvalSet::new(features, vec![0, 1, 0, 1], 2).unwrap();
/// let validator = PerClassValidator::new(ValidationMetric::AccuracyPerClass);
/// let report = validator.evaluate(&Flat, &set).unwrap();
/// assert_eq!(report.per_class().count(0), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PerClassValidator {
    metric: ValidationMetric,
    per_class_cap: Option<usize>,
    batch_size: usize,
}

impl Default for PerClassValidator {
    fn default() -> Self {
        Self::new(ValidationMetric::default())
    }
}

impl PerClassValidator {
    /// Create a validator with the default cap (30) and batch size (64).
    pub fn new(metric: ValidationMetric) -> Self {
        Self {
            metric,
            per_class_cap: Some(DEFAULT_PER_CLASS_CAP),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the per-class sample cap.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.per_class_cap = Some(cap);
        self
    }

    /// Disable per-class capping entirely.
    pub fn without_cap(mut self) -> Self {
        self.per_class_cap = None;
        self
    }

    /// Override the evaluation batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Run inference over the evaluation set and report per-class metrics.
    ///
    /// Batches are processed in dataset order; per-sample loss and argmax
    /// within one batch are computed in parallel without reordering.
    pub fn evaluate<M: Classifier + ?Sized>(
        &self,
        model: &M,
        data: &EvalSet,
    ) -> Result<ValidationReport, PartaError> {
        if self.batch_size == 0 {
            return Err(PartaError::InvalidBatchSize);
        }

        let n = data.len();
        let num_classes = data.num_classes();
        let labels = data.labels();

        let mut accumulators: Vec<ClassAccumulator> =
            (0..num_classes).map(|_| ClassAccumulator::new()).collect();
        let mut total_correct = 0usize;

        let mut start = 0;
        while start < n {
            let end = (start + self.batch_size).min(n);
            let batch = data.batch(start, end);
            let scores = model.scores(batch);

            if scores.dim() != (end - start, num_classes) {
                return Err(PartaError::ScoreShapeMismatch {
                    expected_rows: end - start,
                    expected_cols: num_classes,
                    actual_rows: scores.nrows(),
                    actual_cols: scores.ncols(),
                });
            }

            let rows: Vec<(f32, usize)> = (0..end - start)
                .into_par_iter()
                .map(|i| {
                    let row = scores.row(i);
                    (cross_entropy(row, labels[start + i]), argmax(row))
                })
                .collect();

            for (i, (loss, prediction)) in rows.into_iter().enumerate() {
                let label = labels[start + i];
                let correct = prediction == label;
                if correct {
                    total_correct += 1;
                }
                accumulators[label].record(loss, correct);
            }
            start = end;
        }

        debug!(
            "validated {} samples over {} classes ({} correct)",
            n, num_classes, total_correct
        );

        let summaries: Vec<_> = accumulators
            .iter()
            .map(|acc| acc.finalize(self.per_class_cap))
            .collect();

        Ok(match self.metric {
            ValidationMetric::LossPerClass => {
                ValidationReport::LossPerClass(build_loss_report(&summaries))
            }
            ValidationMetric::AccuracyPerClass => {
                ValidationReport::AccuracyPerClass(build_accuracy_report(&summaries))
            }
            ValidationMetric::Combined => ValidationReport::Combined {
                overall_accuracy: 100.0 * total_correct as f64 / n as f64,
                loss: build_loss_report(&summaries),
            },
        })
    }
}
