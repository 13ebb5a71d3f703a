//! Metadata tables carried alongside the feature matrix.
//!
//! Both tables are assembled in one step (supplied values or defaults) and
//! are read-only once they are attached to a dataset.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::DatasetError;

/// Per-feature metadata, one entry per feature column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    feature_names: Vec<String>,
    #[serde(default)]
    extra: BTreeMap<String, Vec<String>>,
}

impl ColumnMetadata {
    /// Metadata with explicit feature names and no extra columns.
    pub fn new<I, S>(feature_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            feature_names: feature_names.into_iter().map(Into::into).collect(),
            extra: BTreeMap::new(),
        }
    }

    /// Positional identifiers `"0", "1", ...` for `n_features` columns.
    pub fn positional(n_features: usize) -> Self {
        Self::new((0..n_features).map(|idx| idx.to_string()))
    }

    /// Attach an extra named column (one value per feature).
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.extra.insert(name.into(), values);
        self
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Look up an extra column by name.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.extra.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_names.is_empty()
    }

    pub(super) fn validate(&self, n_features: usize) -> Result<(), DatasetError> {
        if self.feature_names.len() != n_features {
            return Err(DatasetError::ShapeMismatch {
                what: "column metadata",
                expected: n_features,
                actual: self.feature_names.len(),
            });
        }
        let mut seen = HashSet::with_capacity(n_features);
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(DatasetError::DuplicateFeatureName(name.clone()));
            }
        }
        validate_extra(&self.extra, n_features)
    }
}

/// Per-sample metadata, one entry per row.
///
/// `original_index` records each sample's position in the root dataset and is
/// copied verbatim into every derived sub-container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMetadata {
    original_index: Vec<usize>,
    #[serde(default)]
    extra: BTreeMap<String, Vec<String>>,
}

impl SampleMetadata {
    pub fn new(original_index: Vec<usize>) -> Self {
        Self {
            original_index,
            extra: BTreeMap::new(),
        }
    }

    /// Default metadata for a freshly created dataset: `0..n_samples`.
    pub fn sequential(n_samples: usize) -> Self {
        Self::new((0..n_samples).collect())
    }

    /// Attach an extra named column (one value per sample).
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.extra.insert(name.into(), values);
        self
    }

    pub fn original_index(&self) -> &[usize] {
        &self.original_index
    }

    /// Look up an extra column by name.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.extra.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.original_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original_index.is_empty()
    }

    /// Copy the rows at `indices`, in order. Indices must already be validated.
    pub(super) fn select(&self, indices: &[usize]) -> Self {
        let original_index = indices.iter().map(|&idx| self.original_index[idx]).collect();
        let extra = self
            .extra
            .iter()
            .map(|(name, values)| {
                let picked = indices.iter().map(|&idx| values[idx].clone()).collect();
                (name.clone(), picked)
            })
            .collect();
        Self {
            original_index,
            extra,
        }
    }

    pub(super) fn validate(&self, n_samples: usize) -> Result<(), DatasetError> {
        if self.original_index.len() != n_samples {
            return Err(DatasetError::ShapeMismatch {
                what: "sample metadata",
                expected: n_samples,
                actual: self.original_index.len(),
            });
        }
        validate_extra(&self.extra, n_samples)
    }
}

fn validate_extra(
    extra: &BTreeMap<String, Vec<String>>,
    expected: usize,
) -> Result<(), DatasetError> {
    for (column, values) in extra {
        if values.len() != expected {
            return Err(DatasetError::MetadataLength {
                column: column.clone(),
                expected,
                actual: values.len(),
            });
        }
    }
    Ok(())
}
