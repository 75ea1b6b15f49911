//! Sequence model boundary for one-step price prediction
//!
//! The trained model is an external artifact: given a fixed-length window
//! of normalized feature rows it predicts the next normalized price. The
//! engine only sees the [`SequenceModel`] trait, so the concrete
//! architecture behind the artifact is interchangeable.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs::File;
use std::path::Path;

/// One-step-ahead predictor over a window of normalized feature rows
pub trait SequenceModel: Debug {
    /// Predict the next normalized price (feature column 0) from a window
    /// of `window_size` rows of `n_features` columns each
    fn predict_next(&self, window: &[Vec<f64>]) -> Result<f64>;
}

/// Linear sequence model: one weight per window cell plus a bias, applied
/// to the flattened window. Deserialized from a JSON artifact exported by
/// the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSequenceModel {
    /// Window length the model was trained on
    window_size: usize,
    /// Feature count the model was trained on
    n_features: usize,
    /// Flattened weights, row-major, length `window_size * n_features`
    weights: Vec<f64>,
    /// Bias term
    bias: f64,
}

impl LinearSequenceModel {
    /// Create a model from explicit parameters
    pub fn new(window_size: usize, n_features: usize, weights: Vec<f64>, bias: f64) -> Result<Self> {
        if weights.len() != window_size * n_features {
            return Err(ForecastError::FeatureCountMismatch {
                expected: window_size * n_features,
                actual: weights.len(),
            });
        }

        Ok(Self {
            window_size,
            n_features,
            weights,
            bias,
        })
    }

    /// Load a trained model from a JSON artifact
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let model: Self = serde_json::from_reader(file)?;
        Self::new(model.window_size, model.n_features, model.weights, model.bias)
    }

    /// Save the model to a JSON artifact
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Window length the model expects
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Feature count the model expects
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

impl SequenceModel for LinearSequenceModel {
    fn predict_next(&self, window: &[Vec<f64>]) -> Result<f64> {
        if window.len() != self.window_size {
            return Err(ForecastError::FeatureCountMismatch {
                expected: self.window_size,
                actual: window.len(),
            });
        }

        let mut acc = self.bias;
        for (i, row) in window.iter().enumerate() {
            if row.len() != self.n_features {
                return Err(ForecastError::FeatureCountMismatch {
                    expected: self.n_features,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                acc += self.weights[i * self.n_features + j] * value;
            }
        }

        if !acc.is_finite() {
            return Err(ForecastError::PredictionFailure(
                "Model produced a non-finite prediction".to_string(),
            ));
        }

        Ok(acc)
    }
}
