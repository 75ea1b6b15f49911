//! Autoregressive multi-step forecasting engine
//!
//! Combines a trained sequence model and a fitted scaler into a multi-day
//! retail price forecast. The rollout is strictly sequential: every step
//! feeds its own prediction back into the input window, so steps cannot be
//! reordered or parallelized. A whole forecast invocation is request-scoped;
//! the model and scaler are the only shared state, held read-only.

use crate::data::{FeatureMatrix, MarketData};
use crate::error::{ForecastError, Result};
use crate::model::SequenceModel;
use crate::scaler::Scaler;
use crate::utils::future_dates;
use crate::WINDOW_SIZE;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// Fixed-size sliding buffer of the most recent normalized rows
#[derive(Debug, Clone)]
struct Window {
    rows: Vec<Vec<f64>>,
}

impl Window {
    /// Take the last `size` rows of the normalized matrix as the initial
    /// window. The caller guarantees the matrix holds at least `size` rows.
    fn from_tail(matrix: &FeatureMatrix, size: usize) -> Self {
        let rows = matrix.rows();
        Self {
            rows: rows[rows.len() - size..].to_vec(),
        }
    }

    fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Drop the oldest row and append the newest; length never changes
    fn slide(&mut self, row: Vec<f64>) {
        self.rows.remove(0);
        self.rows.push(row);
    }
}

/// One forecasted day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Calendar date of the prediction
    pub date: NaiveDate,
    /// Predicted retail price, real-world scale
    pub predicted_price: f64,
}

/// Ordered multi-day price forecast for one commodity/market pair
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    /// Commodity the forecast was requested for
    pub commodity: String,
    /// Market the forecast was requested for
    pub market: String,
    /// Consecutive daily predictions, ascending by date
    pub points: Vec<ForecastPoint>,
}

impl Forecast {
    /// Number of forecasted days
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serialize the forecast to JSON for transport
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Forecast engine holding the process-wide model and scaler.
///
/// Both collaborators are loaded once at startup and shared read-only;
/// the engine itself is cheap to clone across worker threads.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    model: Arc<dyn SequenceModel + Send + Sync>,
    scaler: Arc<dyn Scaler + Send + Sync>,
}

impl ForecastEngine {
    /// Create an engine from a loaded model and fitted scaler
    pub fn new(
        model: Arc<dyn SequenceModel + Send + Sync>,
        scaler: Arc<dyn Scaler + Send + Sync>,
    ) -> Self {
        Self { model, scaler }
    }

    /// Forecast `forecast_days` future daily retail prices for one
    /// commodity/market pair.
    ///
    /// Negative horizons are rejected before any data access or model
    /// invocation; a zero horizon yields an empty forecast. Dates start
    /// the day after the latest date in the historical dataset.
    pub fn forecast(
        &self,
        data: &MarketData,
        commodity: &str,
        market: &str,
        forecast_days: i64,
    ) -> Result<Forecast> {
        if forecast_days < 0 {
            return Err(ForecastError::InvalidHorizon(forecast_days));
        }
        let horizon = forecast_days as usize;

        let matrix = data.feature_matrix(commodity, market)?;
        let normalized = self.scaler.transform(&matrix)?;

        let predictions = self.rollout(&normalized, horizon)?;

        let dates = future_dates(data.max_date()?, horizon);
        let points = dates
            .into_iter()
            .zip(predictions)
            .map(|(date, predicted_price)| ForecastPoint {
                date,
                predicted_price,
            })
            .collect();

        Ok(Forecast {
            commodity: commodity.to_string(),
            market: market.to_string(),
            points,
        })
    }

    /// Run the autoregressive rollout over the normalized matrix.
    ///
    /// Each step predicts one normalized price, expands it into a synthetic
    /// full-width row (zeros everywhere but the price column, which is all
    /// the inverse transform needs to be shape-compatible), inverts that row
    /// to recover the real-world price, and slides the window forward with
    /// the synthetic row as the newest observation.
    fn rollout(&self, normalized: &FeatureMatrix, horizon: usize) -> Result<Vec<f64>> {
        let n_features = normalized.n_features();
        let mut window = Window::from_tail(normalized, WINDOW_SIZE);
        let mut predictions = Vec::with_capacity(horizon);

        for step in 0..horizon {
            let predicted = self.model.predict_next(window.rows())?;
            if !predicted.is_finite() {
                return Err(ForecastError::PredictionFailure(format!(
                    "Non-finite prediction at step {}",
                    step + 1
                )));
            }

            let mut synthetic = vec![0.0; n_features];
            synthetic[0] = predicted;

            let inverted = self.scaler.inverse_transform_row(&synthetic)?;
            predictions.push(inverted[0]);

            window.slide(synthetic);
        }

        Ok(predictions)
    }
}
