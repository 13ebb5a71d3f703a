//! Row-aligned dataset container with reproducible train/holdout splitting.
//!
//! A [`Dataset`] keeps the feature matrix, an optional target matrix and the
//! column/sample metadata tables aligned through every derived sub-container.
//! Partitioning is delegated to a pluggable [`Splitter`] so alternative
//! strategies (stratified, time-based) can be swapped in without touching the
//! container.

mod container;
mod error;
mod metadata;
mod splitter;

pub use container::{Dataset, DatasetBuilder};
pub use error::DatasetError;
pub use metadata::{ColumnMetadata, SampleMetadata};
pub use splitter::{ShuffleSplitter, Splitter};
