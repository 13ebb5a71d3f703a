use thiserror::Error;

/// Errors raised while building or deriving a [`Dataset`](super::Dataset).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// Row or column counts of the supplied tables disagree.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A row index fell outside `[0, n_samples)`.
    #[error("index {index} out of range for dataset with {n_samples} samples")]
    IndexOutOfRange { index: usize, n_samples: usize },
    /// Two feature columns share a name.
    #[error("duplicate feature name {0:?}")]
    DuplicateFeatureName(String),
    /// An extra metadata column is not aligned with its table.
    #[error("metadata column {column:?} has {actual} entries, expected {expected}")]
    MetadataLength {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// Split ratios must lie strictly between 0 and 1.
    #[error("split ratio must be in (0, 1), got {0}")]
    InvalidRatio(f64),
    /// A splitter returned index sets that overlap or miss rows.
    #[error("splitter returned {left} + {right} indices that do not partition {n_samples} rows")]
    InvalidPartition {
        n_samples: usize,
        left: usize,
        right: usize,
    },
}
