//! Feature scaling between raw and normalized space
//!
//! The scaler is fit once by the training pipeline and loaded here as a
//! frozen artifact; inference never refits, so the normalized space stays
//! consistent with what the sequence model was trained on.

use crate::data::FeatureMatrix;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs::File;
use std::path::Path;

/// Per-column forward and inverse scaling over feature matrices
pub trait Scaler: Debug {
    /// Apply the forward transform to every row of the matrix
    fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix>;

    /// Apply the inverse transform to a single full-width row
    fn inverse_transform_row(&self, row: &[f64]) -> Result<Vec<f64>>;

    /// Number of columns the scaler was fit on
    fn n_features(&self) -> usize;
}

/// Min-max scaler mapping each column independently into a target range.
///
/// Columns do not couple through the transform, which is what makes the
/// rollout's zero-filled synthetic rows safe to invert: the price column
/// inverts correctly no matter what the placeholder columns hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-column minimum observed at fit time
    mins: Vec<f64>,
    /// Per-column maximum observed at fit time
    maxs: Vec<f64>,
    /// Target range, default [0, 1]
    range: (f64, f64),
}

impl MinMaxScaler {
    /// Fit a scaler on a feature matrix. Used by tests and demos; the
    /// engine always works with a previously fitted artifact.
    pub fn fit(matrix: &FeatureMatrix) -> Result<Self> {
        Self::fit_with_range(matrix, (0.0, 1.0))
    }

    /// Fit a scaler with an explicit target range
    pub fn fit_with_range(matrix: &FeatureMatrix, range: (f64, f64)) -> Result<Self> {
        if matrix.is_empty() {
            return Err(ForecastError::DataError(
                "Cannot fit scaler on an empty matrix".to_string(),
            ));
        }
        if range.1 <= range.0 {
            return Err(ForecastError::DataError(format!(
                "Invalid target range: [{}, {}]",
                range.0, range.1
            )));
        }

        let n = matrix.n_features();
        let mut mins = vec![f64::INFINITY; n];
        let mut maxs = vec![f64::NEG_INFINITY; n];

        for row in matrix.rows() {
            for (j, &value) in row.iter().enumerate() {
                mins[j] = mins[j].min(value);
                maxs[j] = maxs[j].max(value);
            }
        }

        Ok(Self { mins, maxs, range })
    }

    /// Load a fitted scaler from a JSON artifact
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let scaler: Self = serde_json::from_reader(file)?;

        if scaler.mins.len() != scaler.maxs.len() || scaler.range.1 <= scaler.range.0 {
            return Err(ForecastError::DataError(
                "Malformed scaler artifact".to_string(),
            ));
        }

        Ok(scaler)
    }

    /// Save the fitted scaler to a JSON artifact
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    fn check_width(&self, actual: usize) -> Result<()> {
        if actual != self.mins.len() {
            return Err(ForecastError::FeatureCountMismatch {
                expected: self.mins.len(),
                actual,
            });
        }
        Ok(())
    }

    /// Column span at fit time; constant columns scale with span 1 so the
    /// transform stays invertible
    fn span(&self, j: usize) -> f64 {
        let span = self.maxs[j] - self.mins[j];
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }
}

impl Scaler for MinMaxScaler {
    fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.check_width(matrix.n_features())?;

        let (lo, hi) = self.range;
        let rows = matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(j, &value)| (value - self.mins[j]) / self.span(j) * (hi - lo) + lo)
                    .collect()
            })
            .collect();

        FeatureMatrix::from_rows(rows)
    }

    fn inverse_transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_width(row.len())?;

        let (lo, hi) = self.range;
        Ok(row
            .iter()
            .enumerate()
            .map(|(j, &value)| (value - lo) / (hi - lo) * self.span(j) + self.mins[j])
            .collect())
    }

    fn n_features(&self) -> usize {
        self.mins.len()
    }
}
