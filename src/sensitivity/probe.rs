//! Model-agnostic sensitivity probes.
//!
//! Each feature column is perturbed in turn (permuted, or overwritten with a
//! missing-value marker) and the mean absolute change of the predictions is
//! recorded. Both probes measure the same quantity on the same scale, and
//! reports are normalized so they can be compared directly.

use ndarray::{Array1, Array2, ArrayView2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{SensitivityMethod, SensitivityReport};
use crate::dataset::Dataset;

/// Anything that maps a feature matrix to one prediction row per sample.
pub trait Predictor {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Array2<f64>;
}

impl<F> Predictor for F
where
    F: Fn(ArrayView2<'_, f64>) -> Array2<f64>,
{
    fn predict(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        self(x)
    }
}

/// Probe settings; also the `[probe]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Seed for column permutations.
    #[serde(default)]
    pub seed: u64,
    /// Marker written into a column for the missing probe; `None` imputes
    /// the mean of the column's finite values.
    #[serde(default)]
    pub missing_value: Option<f64>,
}

impl ProbeOptions {
    fn marker(&self, column: &[f64]) -> f64 {
        self.missing_value.unwrap_or_else(|| finite_mean(column))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("predictor returned {actual:?} predictions, expected {expected:?}")]
    PredictionShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Perturbing a feature turned finite predictions into NaN or infinity,
    /// so the size of the change cannot be measured.
    #[error("perturbing feature {feature:?} made {count} predictions non-finite")]
    NonFinitePredictions { feature: String, count: usize },
}

/// Sensitivity to permuting each feature across rows.
pub fn shuffled_sensitivity<P: Predictor + ?Sized>(
    model: &P,
    dataset: &Dataset,
    options: &ProbeOptions,
) -> Result<SensitivityReport, ProbeError> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    probe(model, dataset, SensitivityMethod::Shuffled, |column| {
        let mut values = column.to_vec();
        values.shuffle(&mut rng);
        Array1::from(values)
    })
}

/// Sensitivity to replacing each feature with the missing-value marker.
pub fn missing_sensitivity<P: Predictor + ?Sized>(
    model: &P,
    dataset: &Dataset,
    options: &ProbeOptions,
) -> Result<SensitivityReport, ProbeError> {
    probe(model, dataset, SensitivityMethod::Missing, |column| {
        Array1::from_elem(column.len(), options.marker(column))
    })
}

fn probe<P, F>(
    model: &P,
    dataset: &Dataset,
    method: SensitivityMethod,
    mut perturb: F,
) -> Result<SensitivityReport, ProbeError>
where
    P: Predictor + ?Sized,
    F: FnMut(&[f64]) -> Array1<f64>,
{
    let names = dataset.feature_names();
    if dataset.n_samples() == 0 {
        return Ok(SensitivityReport::new(
            method,
            names.iter().map(|name| (name.clone(), 0.0)),
        ));
    }

    let baseline = model.predict(dataset.values());
    check_rows(&baseline, dataset.n_samples())?;
    let mut sensitivities = Vec::with_capacity(names.len());
    for (col, name) in names.iter().enumerate() {
        let mut perturbed = dataset.values().to_owned();
        let original = perturbed.column(col).to_vec();
        perturbed.column_mut(col).assign(&perturb(&original));
        let predictions = model.predict(perturbed.view());
        if predictions.dim() != baseline.dim() {
            return Err(ProbeError::PredictionShape {
                expected: baseline.dim(),
                actual: predictions.dim(),
            });
        }
        let change = mean_abs_change(&baseline, &predictions).map_err(|count| {
            ProbeError::NonFinitePredictions {
                feature: name.clone(),
                count,
            }
        })?;
        sensitivities.push((name.clone(), change));
    }
    debug!(%method, features = names.len(), "probed sensitivities");
    Ok(SensitivityReport::new(method, sensitivities).normalized())
}

fn check_rows(predictions: &Array2<f64>, n_samples: usize) -> Result<(), ProbeError> {
    if predictions.nrows() != n_samples {
        return Err(ProbeError::PredictionShape {
            expected: (n_samples, predictions.ncols()),
            actual: predictions.dim(),
        });
    }
    Ok(())
}

/// Mean absolute difference over outputs whose baseline is finite.
///
/// Fails with the number of outputs that went from finite to non-finite.
fn mean_abs_change(baseline: &Array2<f64>, perturbed: &Array2<f64>) -> Result<f64, usize> {
    let mut total = 0.0;
    let mut measured = 0usize;
    let mut broken = 0usize;
    for (&before, &after) in baseline.iter().zip(perturbed.iter()) {
        if !before.is_finite() {
            continue;
        }
        if !after.is_finite() {
            broken += 1;
            continue;
        }
        total += (before - after).abs();
        measured += 1;
    }
    if broken > 0 {
        return Err(broken);
    }
    if measured == 0 {
        return Ok(0.0);
    }
    Ok(total / measured as f64)
}

fn finite_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|value| value.is_finite())
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
