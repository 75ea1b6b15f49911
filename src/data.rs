//! Historical market data handling and feature selection

use crate::error::{ForecastError, Result};
use crate::utils::parse_date;
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Name of the date column in the historical dataset
pub const DATE_COLUMN: &str = "Date";
/// Name of the commodity identifier column
pub const COMMODITY_COLUMN: &str = "Commodity";
/// Name of the market identifier column
pub const MARKET_COLUMN: &str = "Market";

/// Engineered feature columns, in the order the model and scaler were fit on.
/// Column 0 (`Retail`) is the forecast target.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "Retail",
    "Wholesale_log",
    "Supply_Volume_log",
    "Retail_Lag1",
    "Retail_Lag7",
    "Retail_Rolling3",
    "Wholesale_Rolling3",
    "Month_sin",
    "Month_cos",
];

/// Feature matrix for one commodity/market pair, rows in chronological order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Create a feature matrix from raw rows, validating that every row
    /// has the same width
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if rows.iter().any(|row| row.len() != width) {
                return Err(ForecastError::DataError(
                    "Feature matrix rows have inconsistent widths".to_string(),
                ));
            }
        }

        Ok(Self { rows })
    }

    /// Get the rows of the matrix
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, or 0 for an empty matrix
    pub fn n_features(&self) -> usize {
        self.rows.first().map(|row| row.len()).unwrap_or(0)
    }
}

/// Historical market price records for all commodities and markets
#[derive(Debug, Clone)]
pub struct MarketData {
    df: DataFrame,
}

/// Data loader for historical market data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load historical market data from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<MarketData> {
        let file = File::open(path)?;
        // Use polars DataFrame reader directly
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        MarketData::from_dataframe(df)
    }
}

impl MarketData {
    /// Create market data from an existing DataFrame, validating that all
    /// required columns are present
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let column_names = df.get_column_names();
        let mut required = vec![DATE_COLUMN, COMMODITY_COLUMN, MARKET_COLUMN];
        required.extend(FEATURE_COLUMNS);

        for name in required {
            if !column_names.contains(&name) {
                return Err(ForecastError::DataError(format!(
                    "Required column '{}' not found in data",
                    name
                )));
            }
        }

        Ok(Self { df })
    }

    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Build the feature matrix for one commodity/market pair.
    ///
    /// Rows are matched by exact, case-sensitive comparison on both
    /// identifiers, rows with missing or non-finite feature values are
    /// dropped, and chronological order is preserved. Fails with
    /// `NoDataAvailable` when fewer clean rows remain than one input
    /// window requires.
    pub fn feature_matrix(&self, commodity: &str, market: &str) -> Result<FeatureMatrix> {
        let commodity_mask = self.df.column(COMMODITY_COLUMN)?.utf8()?.equal(commodity);
        let market_mask = self.df.column(MARKET_COLUMN)?.utf8()?.equal(market);
        let filtered = self.df.filter(&(commodity_mask & market_mask))?;

        let features = filtered.select(FEATURE_COLUMNS)?.drop_nulls::<String>(None)?;

        let columns: Vec<Vec<f64>> = FEATURE_COLUMNS
            .iter()
            .map(|name| column_as_f64(&features, name))
            .collect::<Result<_>>()?;

        let mut rows = Vec::with_capacity(features.height());
        for i in 0..features.height() {
            let row: Vec<f64> = columns.iter().map(|col| col[i]).collect();
            // CSV NaNs survive drop_nulls; treat them as missing too
            if row.iter().all(|v| v.is_finite()) {
                rows.push(row);
            }
        }

        if rows.len() < crate::WINDOW_SIZE {
            return Err(ForecastError::NoDataAvailable {
                commodity: commodity.to_string(),
                market: market.to_string(),
            });
        }

        FeatureMatrix::from_rows(rows)
    }

    /// Maximum date present in the full historical dataset. Future forecast
    /// dates are anchored on this, not on the per-pair maximum.
    pub fn max_date(&self) -> Result<NaiveDate> {
        let col = self.df.column(DATE_COLUMN)?;

        let dates: Vec<NaiveDate> = match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .flatten()
                .map(parse_date)
                .collect::<Result<_>>()?,
            DataType::Date => col
                .date()?
                .into_iter()
                .flatten()
                .map(|days| {
                    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
                        + chrono::Duration::days(days as i64)
                })
                .collect(),
            other => {
                return Err(ForecastError::DataError(format!(
                    "Unsupported dtype for '{}' column: {}",
                    DATE_COLUMN, other
                )))
            }
        };

        dates
            .into_iter()
            .max()
            .ok_or_else(|| ForecastError::DataError("Dataset contains no dates".to_string()))
    }
}

/// Extract a column as f64 values
fn column_as_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
    let col = df.column(column_name).map_err(|e| {
        ForecastError::DataError(format!("Column '{}' not found: {}", column_name, e))
    })?;

    match col.dtype() {
        DataType::Float64 => Ok(col.f64().unwrap().into_iter().flatten().collect()),
        DataType::Float32 => Ok(col
            .f32()
            .unwrap()
            .into_iter()
            .flatten()
            .map(|v| v as f64)
            .collect()),
        DataType::Int64 => Ok(col
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .map(|v| v as f64)
            .collect()),
        DataType::Int32 => Ok(col
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .map(|v| v as f64)
            .collect()),
        _ => Err(ForecastError::DataError(format!(
            "Column '{}' cannot be converted to f64",
            column_name
        ))),
    }
}
