//! Error types for parta-fl

use thiserror::Error;

/// All possible errors in parta-fl
#[derive(Error, Debug)]
pub enum PartaError {
    /// Partitioning was requested for zero participants
    #[error("Zero participants requested")]
    ZeroParticipants,

    /// The dataset contains no classes
    #[error("Dataset has zero classes")]
    ZeroClasses,

    /// The dataset contains no samples
    #[error("Empty dataset provided")]
    EmptyDataset,

    /// Bias parameter is outside the valid range
    #[error("Invalid bias: {0} (must be 0.0-1.0)")]
    InvalidBias(f64),

    /// Dirichlet concentration is outside the valid range
    #[error("Invalid concentration: {0} (must be finite and > 0)")]
    InvalidConcentration(f64),

    /// Server pool concentration fraction is outside the valid range
    #[error("Invalid server fraction: {0} (must be 0.0-1.0)")]
    InvalidServerFraction(f64),

    /// A label does not fit the configured class count
    #[error("Label {label} out of range for {num_classes} classes")]
    LabelOutOfRange {
        /// The offending label
        label: usize,
        /// Number of classes configured
        num_classes: usize,
    },

    /// Model output shape does not match the evaluation batch
    #[error(
        "Score shape mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}"
    )]
    ScoreShapeMismatch {
        /// Expected number of rows (batch length)
        expected_rows: usize,
        /// Expected number of columns (class count)
        expected_cols: usize,
        /// Actual rows produced by the model
        actual_rows: usize,
        /// Actual columns produced by the model
        actual_cols: usize,
    },

    /// Feature matrix and label vector disagree in length
    #[error("Dimension mismatch: {rows} feature rows vs {labels} labels")]
    DimensionMismatch {
        /// Feature matrix rows
        rows: usize,
        /// Label vector length
        labels: usize,
    },

    /// Batch size of zero was configured
    #[error("Invalid batch size: 0")]
    InvalidBatchSize,

    /// More adversaries requested than participants exist
    #[error("Adversary count {requested} exceeds participant count {participants}")]
    AdversaryCountExceedsParticipants {
        /// Requested roster size
        requested: usize,
        /// Available participants
        participants: usize,
    },
}
