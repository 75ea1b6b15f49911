//! # Market Forecast
//!
//! A Rust library for forecasting commodity retail prices from historical
//! market data with a pretrained sequence model.
//!
//! ## Features
//!
//! - Historical market data loading and per-pair feature selection
//! - Min-max feature scaling with frozen training-time parameters
//! - Autoregressive multi-step rollout over a 14-day input window
//! - Calendar-aligned forecast results, ready to serialize
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use market_forecast::{DataLoader, ForecastEngine, LinearSequenceModel, MinMaxScaler};
//!
//! # fn main() -> market_forecast::Result<()> {
//! // Load the artifacts once at startup
//! let model = Arc::new(LinearSequenceModel::from_json_file("model.json")?);
//! let scaler = Arc::new(MinMaxScaler::from_json_file("scaler.json")?);
//! let engine = ForecastEngine::new(model, scaler);
//!
//! // Forecast 7 days of retail prices per request
//! let data = DataLoader::from_csv("merged_data.csv")?;
//! let forecast = engine.forecast(&data, "Maize", "Nairobi", 7)?;
//!
//! for point in &forecast.points {
//!     println!("{}: {:.2}", point.date, point.predicted_price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod engine;
pub mod error;
pub mod model;
pub mod scaler;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DataLoader, FeatureMatrix, MarketData, FEATURE_COLUMNS};
pub use crate::engine::{Forecast, ForecastEngine, ForecastPoint};
pub use crate::error::{ForecastError, Result};
pub use crate::model::{LinearSequenceModel, SequenceModel};
pub use crate::scaler::{MinMaxScaler, Scaler};

/// Number of most-recent rows fed to the sequence model as one input window
pub const WINDOW_SIZE: usize = 14;

/// Number of engineered feature columns the model and scaler were fit on
pub const FEATURE_COUNT: usize = 9;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
