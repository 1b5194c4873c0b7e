//! Dataset abstractions consumed by the partitioner and validator.
//!
//! Partitioning only ever inspects labels, so its input seam is the minimal
//! [`LabelSource`] trait. Validation additionally needs the feature rows a
//! model can run inference over, provided by [`EvalSet`].

use ndarray::{s, Array2, ArrayView2};

use crate::error::PartaError;

/// Read-only access to the labels of an ordered dataset.
///
/// Labels are class indices in `[0, num_classes)`. Implementations must be
/// stable: the same index always yields the same label within one
/// partitioning call.
pub trait LabelSource {
    /// Total number of samples.
    fn len(&self) -> usize;

    /// Label of the sample at `index`.
    ///
    /// Only required to be valid for `index < self.len()`.
    fn label(&self, index: usize) -> usize;

    /// Whether the dataset holds no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LabelSource for [usize] {
    fn len(&self) -> usize {
        <[usize]>::len(self)
    }

    fn label(&self, index: usize) -> usize {
        self[index]
    }
}

impl LabelSource for Vec<usize> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn label(&self, index: usize) -> usize {
        self[index]
    }
}

/// A held-out evaluation set: one feature row per sample plus its label.
///
/// Shape and label ranges are validated on construction so the validator
/// can iterate batches without re-checking every access.
#[derive(Clone, Debug)]
pub struct EvalSet {
    features: Array2<f32>,
    labels: Vec<usize>,
    num_classes: usize,
}

impl EvalSet {
    /// Build an evaluation set from a feature matrix and parallel labels.
    ///
    /// # Errors
    ///
    /// * [`PartaError::EmptyDataset`] if there are no samples
    /// * [`PartaError::ZeroClasses`] if `num_classes` is zero
    /// * [`PartaError::DimensionMismatch`] if rows and labels disagree
    /// * [`PartaError::LabelOutOfRange`] if any label is `>= num_classes`
    pub fn new(
        features: Array2<f32>,
        labels: Vec<usize>,
        num_classes: usize,
    ) -> Result<Self, PartaError> {
        if num_classes == 0 {
            return Err(PartaError::ZeroClasses);
        }
        if labels.is_empty() {
            return Err(PartaError::EmptyDataset);
        }
        if features.nrows() != labels.len() {
            return Err(PartaError::DimensionMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= num_classes) {
            return Err(PartaError::LabelOutOfRange { label, num_classes });
        }

        Ok(Self {
            features,
            labels,
            num_classes,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set holds no samples (never true for a constructed set).
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of classes the labels are drawn from.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// All labels, in dataset order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// View of the feature rows in `start..end`.
    pub fn batch(&self, start: usize, end: usize) -> ArrayView2<'_, f32> {
        self.features.slice(s![start..end, ..])
    }
}

impl LabelSource for EvalSet {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn label(&self, index: usize) -> usize {
        self.labels[index]
    }
}
