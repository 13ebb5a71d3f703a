use featscope::Dataset;
use ndarray::{Array2, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `y = sum(x) + x0 - x1`: feature 0 counts double, feature 1 not at all.
pub fn target_fn(x: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut y = x.sum_axis(Axis(1));
    y += &x.column(0);
    y -= &x.column(1);
    y.insert_axis(Axis(1))
}

/// Model that learned `target_fn` exactly, without ever reading feature 1.
pub fn fitted_model(x: ArrayView2<'_, f64>) -> Array2<f64> {
    let mut y = x.column(0).to_owned() * 2.0;
    for col in 2..x.ncols() {
        y += &x.column(col);
    }
    y.insert_axis(Axis(1))
}

pub fn uniform_features(n_samples: usize, n_features: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_simple_fn((n_samples, n_features), || rng.random::<f64>())
}

pub fn feature_names(n_features: usize) -> Vec<String> {
    (0..n_features).map(|k| format!("f_{k}")).collect()
}

/// 1000 samples, 10 named features, regression target from `target_fn`.
pub fn regression_dataset() -> Dataset {
    let x = uniform_features(1000, 10, 3);
    let y = target_fn(x.view());
    Dataset::builder(x)
        .target(y)
        .feature_names(feature_names(10))
        .build()
        .expect("valid dataset")
}
