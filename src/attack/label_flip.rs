//! Targeted label flipping and poison-evaluation index splits.

use crate::data::LabelSource;
use crate::error::PartaError;

/// The flipped counterpart of a label: `num_classes - label - 1`.
///
/// Flipping is an involution, so applying it twice restores the original
/// label.
pub fn flipped_label(label: usize, num_classes: usize) -> usize {
    num_classes - label - 1
}

/// Flip every occurrence of `target` in a label vector.
///
/// Returns the poisoned label vector and the number of flips applied.
///
/// # Errors
///
/// Returns [`PartaError::LabelOutOfRange`] when `target` or any label in
/// the input does not fit `num_classes`.
pub fn flip_targeted(
    labels: &[usize],
    target: usize,
    num_classes: usize,
) -> Result<(Vec<usize>, usize), PartaError> {
    if num_classes == 0 {
        return Err(PartaError::ZeroClasses);
    }
    if target >= num_classes {
        return Err(PartaError::LabelOutOfRange {
            label: target,
            num_classes,
        });
    }
    if let Some(&label) = labels.iter().find(|&&l| l >= num_classes) {
        return Err(PartaError::LabelOutOfRange { label, num_classes });
    }

    let mut flipped = 0;
    let poisoned = labels
        .iter()
        .map(|&label| {
            if label == target {
                flipped += 1;
                flipped_label(label, num_classes)
            } else {
                label
            }
        })
        .collect();
    Ok((poisoned, flipped))
}

/// Split an evaluation set's indices by the attack target label.
///
/// Returns `(non-target indices, target indices)`, both in dataset order:
/// the first is the clean evaluation set for measuring collateral damage,
/// the second isolates the attacked class.
pub fn split_by_target<D: LabelSource + ?Sized>(
    data: &D,
    target: usize,
) -> (Vec<usize>, Vec<usize>) {
    let mut clean = Vec::new();
    let mut targeted = Vec::new();
    for index in 0..data.len() {
        if data.label(index) == target {
            targeted.push(index);
        } else {
            clean.push(index);
        }
    }
    (clean, targeted)
}
