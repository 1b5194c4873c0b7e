//! Label-skew diagnostics over a finished partition.
//!
//! Used by aggregation-defense research to quantify how non-IID a
//! participant's partition actually came out.

use crate::data::LabelSource;
use crate::error::PartaError;

/// Per-class sample counts for a set of dataset indices.
pub fn class_histogram<D: LabelSource + ?Sized>(
    data: &D,
    indices: &[usize],
    num_classes: usize,
) -> Result<Vec<usize>, PartaError> {
    if num_classes == 0 {
        return Err(PartaError::ZeroClasses);
    }

    let mut counts = vec![0usize; num_classes];
    for &index in indices {
        let label = data.label(index);
        if label >= num_classes {
            return Err(PartaError::LabelOutOfRange { label, num_classes });
        }
        counts[label] += 1;
    }
    Ok(counts)
}

/// Normalized per-class ratios for a set of dataset indices.
///
/// Ratios sum to 1.0; every ratio is NaN when `indices` is empty, matching
/// the undefined-rate convention of the per-class validator.
pub fn label_skew_ratios<D: LabelSource + ?Sized>(
    data: &D,
    indices: &[usize],
    num_classes: usize,
) -> Result<Vec<f64>, PartaError> {
    let counts = class_histogram(data, indices, num_classes)?;
    let total: usize = counts.iter().sum();
    if total == 0 {
        return Ok(vec![f64::NAN; num_classes]);
    }
    Ok(counts
        .into_iter()
        .map(|c| c as f64 / total as f64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts() {
        let labels = vec![0usize, 1, 1, 2, 2, 2];
        let counts = class_histogram(&labels, &[0, 1, 2, 3, 4, 5], 3).unwrap();
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[test]
    fn test_histogram_subset() {
        let labels = vec![0usize, 1, 1, 2, 2, 2];
        let counts = class_histogram(&labels, &[3, 4], 3).unwrap();
        assert_eq!(counts, vec![0, 0, 2]);
    }

    #[test]
    fn test_histogram_label_out_of_range() {
        let labels = vec![0usize, 5];
        assert!(matches!(
            class_histogram(&labels, &[0, 1], 3),
            Err(PartaError::LabelOutOfRange {
                label: 5,
                num_classes: 3
            })
        ));
    }

    #[test]
    fn test_histogram_zero_classes() {
        let labels = vec![0usize];
        assert!(matches!(
            class_histogram(&labels, &[], 0),
            Err(PartaError::ZeroClasses)
        ));
    }

    #[test]
    fn test_ratios_normalized() {
        let labels = vec![0usize, 0, 0, 1];
        let ratios = label_skew_ratios(&labels, &[0, 1, 2, 3], 2).unwrap();
        assert!((ratios[0] - 0.75).abs() < 1e-12);
        assert!((ratios[1] - 0.25).abs() < 1e-12);
        assert!((ratios.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratios_empty_partition_is_nan() {
        let labels = vec![0usize, 1];
        let ratios = label_skew_ratios(&labels, &[], 2).unwrap();
        assert!(ratios.iter().all(|r| r.is_nan()));
    }
}
