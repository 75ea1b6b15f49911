//! Error types for the market_forecast crate

use thiserror::Error;

/// Custom error types for the market_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No rows, or fewer clean rows than one input window, for the
    /// requested commodity/market pair
    #[error("No data available for {commodity} in {market}")]
    NoDataAvailable { commodity: String, market: String },

    /// Negative forecast horizon, rejected before any model invocation
    #[error("Invalid forecast horizon: {0}")]
    InvalidHorizon(i64),

    /// Data shape does not match the shape the scaler or model was fit on
    #[error("Feature count mismatch: expected {expected}, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    /// The sequence model failed mid-rollout; partial forecasts are discarded
    #[error("Prediction failed: {0}")]
    PredictionFailure(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from serializing or deserializing artifacts
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<polars::prelude::PolarsError> for ForecastError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}
