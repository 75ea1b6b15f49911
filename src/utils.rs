//! Utility functions for the market_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Create consecutive future calendar dates for forecasting, starting the
/// day after `last_date`
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(horizon);
    let mut current = last_date;

    for _ in 0..horizon {
        current = current + Duration::days(1);
        dates.push(current);
    }

    dates
}

/// Parse an ISO-8601 calendar date, accepting a trailing time component
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map(|dt| dt.date())
        .map_err(|e| ForecastError::DataError(format!("Cannot parse date '{}': {}", value, e)))
}
