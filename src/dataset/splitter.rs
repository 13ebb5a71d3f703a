//! Partitioning strategies used by [`Dataset::split`](super::Dataset::split).

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::Dataset;

/// Splits the rows of a domain into two disjoint index sets.
///
/// `ratio` is the relative size of the right partition. Implementations must
/// be deterministic for a given `(domain, ratio, seed)` and the two returned
/// sets must cover `0..domain.n_samples()` exactly once.
///
/// The domain is a dataset whose features are the target values (or the row
/// index when there is no target), which leaves room for strategies that
/// look at the target such as stratified splits.
pub trait Splitter: fmt::Debug + Send + Sync {
    fn split(&self, domain: &Dataset, ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>);
}

/// Uniform random split driven by a seeded permutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShuffleSplitter;

impl Splitter for ShuffleSplitter {
    fn split(&self, domain: &Dataset, ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
        let n_samples = domain.n_samples();
        let n_right = right_partition_len(n_samples, ratio);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut permuted: Vec<usize> = (0..n_samples).collect();
        permuted.shuffle(&mut rng);
        let right = permuted.split_off(n_samples - n_right);
        (permuted, right)
    }
}

/// Number of rows assigned to the right partition, rounding halves to even.
pub(crate) fn right_partition_len(n_samples: usize, ratio: f64) -> usize {
    let raw = (n_samples as f64 * ratio).round_ties_even();
    if !raw.is_finite() || raw <= 0.0 {
        0
    } else {
        (raw as usize).min(n_samples)
    }
}
