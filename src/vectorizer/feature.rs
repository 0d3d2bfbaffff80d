//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

/// A fixed-dimension numeric feature vector stored sparsely.
///
/// Entries are kept sorted by column index with no duplicates and no explicit
/// zeros, so two vectors built from the same text compare bit-identical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// An all-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Build a vector from `(index, value)` pairs already sorted by index.
    ///
    /// Zero values are dropped. Indices outside `dimension` are ignored.
    pub fn from_sorted<I>(dimension: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let entries = entries
            .into_iter()
            .filter(|&(idx, value)| idx < dimension && value != 0.0)
            .collect::<Vec<_>>();
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { dimension, entries }
    }

    /// Build a vector from a dense slice.
    pub fn from_dense(values: &[f64]) -> Self {
        Self::from_sorted(values.len(), values.iter().copied().enumerate())
    }

    /// Number of columns, including zeros.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at a column (zero when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(idx, _)| idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Iterate over the non-zero `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product with a dense weight row of the same dimension.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(idx, value)| value * weights.get(idx).copied().unwrap_or(0.0))
            .sum()
    }

    /// Euclidean norm.
    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Sum of absolute values.
    pub fn l1_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v.abs()).sum()
    }

    /// Divide every entry by `divisor`; a zero divisor leaves the vector unchanged.
    pub fn normalize_by(&mut self, divisor: f64) {
        if divisor > 0.0 {
            for (_, value) in &mut self.entries {
                *value /= divisor;
            }
        }
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(idx, value) in &self.entries {
            dense[idx] = value;
        }
        dense
    }
}
