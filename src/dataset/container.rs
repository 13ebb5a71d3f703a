//! Row-aligned feature container with reproducible splitting.

use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use tracing::debug;

use super::{ColumnMetadata, DatasetError, SampleMetadata, ShuffleSplitter, Splitter};
use crate::config::SplitSettings;

/// Feature matrix, optional target and aligned metadata.
///
/// Containers never change after construction; [`Dataset::split`] and
/// [`Dataset::split_by_indices`] return deep copies and leave the source
/// usable.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    target: Option<Array2<f64>>,
    columns: ColumnMetadata,
    samples: SampleMetadata,
    splitter: Arc<dyn Splitter>,
    seed: u64,
}

/// Collects the optional parts of a [`Dataset`] before validation.
#[derive(Debug)]
pub struct DatasetBuilder {
    features: Array2<f64>,
    target: Option<Array2<f64>>,
    columns: Option<ColumnMetadata>,
    samples: Option<SampleMetadata>,
    splitter: Arc<dyn Splitter>,
    seed: u64,
}

impl DatasetBuilder {
    pub fn target(mut self, target: Array2<f64>) -> Self {
        self.target = Some(target);
        self
    }

    /// Single-output target given as a flat vector.
    pub fn target_vector(mut self, target: Array1<f64>) -> Self {
        self.target = Some(target.insert_axis(Axis(1)));
        self
    }

    pub fn column_metadata(mut self, columns: ColumnMetadata) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Shorthand for [`ColumnMetadata::new`] without extra columns.
    pub fn feature_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_metadata(ColumnMetadata::new(names))
    }

    pub fn sample_metadata(mut self, samples: SampleMetadata) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn splitter(mut self, splitter: Arc<dyn Splitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Seed used by [`Dataset::split`].
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate shapes and assemble the dataset.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        let (n_samples, n_features) = self.features.dim();
        if let Some(target) = &self.target {
            if target.nrows() != n_samples {
                return Err(DatasetError::ShapeMismatch {
                    what: "target rows",
                    expected: n_samples,
                    actual: target.nrows(),
                });
            }
        }
        let columns = self
            .columns
            .unwrap_or_else(|| ColumnMetadata::positional(n_features));
        columns.validate(n_features)?;
        let samples = self
            .samples
            .unwrap_or_else(|| SampleMetadata::sequential(n_samples));
        samples.validate(n_samples)?;
        Ok(Dataset {
            features: self.features,
            target: self.target,
            columns,
            samples,
            splitter: self.splitter,
            seed: self.seed,
        })
    }
}

impl Dataset {
    /// Start building a dataset around `features` (rows are samples).
    pub fn builder(features: Array2<f64>) -> DatasetBuilder {
        DatasetBuilder {
            features,
            target: None,
            columns: None,
            samples: None,
            splitter: Arc::new(ShuffleSplitter),
            seed: 0,
        }
    }

    /// Dataset with default metadata, the shuffle splitter and seed `0`.
    pub fn new(features: Array2<f64>, target: Option<Array2<f64>>) -> Result<Self, DatasetError> {
        let builder = Self::builder(features);
        match target {
            Some(target) => builder.target(target).build(),
            None => builder.build(),
        }
    }

    /// New dataset holding exactly the rows at `indices`, in the given order.
    pub fn split_by_indices(&self, indices: &[usize]) -> Result<Self, DatasetError> {
        let n_samples = self.n_samples();
        if let Some(&index) = indices.iter().find(|&&idx| idx >= n_samples) {
            return Err(DatasetError::IndexOutOfRange { index, n_samples });
        }
        Ok(Self {
            features: self.features.select(Axis(0), indices),
            target: self
                .target
                .as_ref()
                .map(|target| target.select(Axis(0), indices)),
            columns: self.columns.clone(),
            samples: self.samples.select(indices),
            splitter: Arc::clone(&self.splitter),
            seed: self.seed,
        })
    }

    /// Partition into `(left, right)` where `right` holds about `ratio` of
    /// the rows. Both halves keep the parent's row order.
    pub fn split(&self, ratio: f64) -> Result<(Self, Self), DatasetError> {
        self.split_with_seed(ratio, self.seed)
    }

    pub fn split_with_seed(&self, ratio: f64, seed: u64) -> Result<(Self, Self), DatasetError> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(DatasetError::InvalidRatio(ratio));
        }
        let domain = self.split_domain()?;
        let (mut left, mut right) = self.splitter.split(&domain, ratio, seed);
        left.sort_unstable();
        right.sort_unstable();
        check_partition(self.n_samples(), &left, &right)?;
        debug!(
            n_samples = self.n_samples(),
            ratio,
            seed,
            left = left.len(),
            right = right.len(),
            "split dataset"
        );
        Ok((self.split_by_indices(&left)?, self.split_by_indices(&right)?))
    }

    /// Split using the ratio and seed from the `[split]` config section.
    pub fn split_with_settings(
        &self,
        settings: &SplitSettings,
    ) -> Result<(Self, Self), DatasetError> {
        self.split_with_seed(settings.ratio, settings.seed)
    }

    /// Throwaway container handed to the splitter: the target (or the row
    /// index when absent) as features, plus the current sample metadata.
    fn split_domain(&self) -> Result<Self, DatasetError> {
        let values = match &self.target {
            Some(target) => target.clone(),
            None => Array2::from_shape_fn((self.n_samples(), 1), |(row, _)| row as f64),
        };
        Self::builder(values)
            .sample_metadata(self.samples.clone())
            .splitter(Arc::clone(&self.splitter))
            .seed(self.seed)
            .build()
    }

    /// Feature names in column order.
    pub fn feature_names(&self) -> &[String] {
        self.columns.feature_names()
    }

    /// `(n_samples, n_features)`.
    pub fn shape(&self) -> (usize, usize) {
        self.features.dim()
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Position of every row in the root dataset.
    pub fn original_index(&self) -> &[usize] {
        self.samples.original_index()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// Target flattened into a column vector, or `None` without a target.
    pub fn target(&self) -> Option<Array2<f64>> {
        self.target.as_ref().map(|target| {
            Array1::from_iter(target.iter().copied()).insert_axis(Axis(1))
        })
    }

    /// Target as supplied, without reshaping.
    pub fn target_matrix(&self) -> Option<ArrayView2<'_, f64>> {
        self.target.as_ref().map(Array2::view)
    }

    pub fn column_metadata(&self) -> &ColumnMetadata {
        &self.columns
    }

    pub fn sample_metadata(&self) -> &SampleMetadata {
        &self.samples
    }

    pub fn splitter(&self) -> &Arc<dyn Splitter> {
        &self.splitter
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Every row must land in exactly one of the two index sets.
fn check_partition(n_samples: usize, left: &[usize], right: &[usize]) -> Result<(), DatasetError> {
    let mut seen = vec![false; n_samples];
    for &index in left.iter().chain(right) {
        let Some(slot) = seen.get_mut(index) else {
            return Err(DatasetError::IndexOutOfRange { index, n_samples });
        };
        if *slot {
            return Err(DatasetError::InvalidPartition {
                n_samples,
                left: left.len(),
                right: right.len(),
            });
        }
        *slot = true;
    }
    if left.len() + right.len() != n_samples {
        return Err(DatasetError::InvalidPartition {
            n_samples,
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}
