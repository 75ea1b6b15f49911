use chrono::{Duration, NaiveDate};
use market_forecast::data::{MarketData, FEATURE_COLUMNS};
use market_forecast::{ForecastEngine, LinearSequenceModel, MinMaxScaler, FEATURE_COUNT, WINDOW_SIZE};
use polars::prelude::*;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Market Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    // Create sample historical data
    println!("Creating sample data...");
    let data = create_sample_market_data()?;
    println!("Sample data created: {} daily records\n", data.len());

    // Fit a scaler on the pair's history. In production both the scaler and
    // the model come from artifacts exported by the training pipeline.
    let matrix = data.feature_matrix("Maize", "Nairobi")?;
    let scaler = MinMaxScaler::fit(&matrix)?;

    // Persistence model: repeats the newest normalized price
    let mut weights = vec![0.0; WINDOW_SIZE * FEATURE_COUNT];
    weights[(WINDOW_SIZE - 1) * FEATURE_COUNT] = 1.0;
    let model = LinearSequenceModel::new(WINDOW_SIZE, FEATURE_COUNT, weights, 0.0)?;

    // Wire the engine and forecast a week ahead
    println!("Generating forecast...");
    let engine = ForecastEngine::new(Arc::new(model), Arc::new(scaler));
    let forecast = engine.forecast(&data, "Maize", "Nairobi", 7)?;

    println!(
        "\n7-day retail price forecast for {} in {}:",
        forecast.commodity, forecast.market
    );
    for point in &forecast.points {
        println!("  {}: {:.2}", point.date, point.predicted_price);
    }

    println!("\nAs JSON:\n{}", forecast.to_json()?);

    Ok(())
}

/// Create 60 days of sample history for Maize in Nairobi with a mild trend
/// and weekly seasonality
fn create_sample_market_data() -> Result<MarketData, Box<dyn std::error::Error>> {
    let n = 60;
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    let dates: Vec<String> = (0..n)
        .map(|i| (start + Duration::days(i as i64)).to_string())
        .collect();

    let retail: Vec<f64> = (0..n)
        .map(|i| 52.0 + i as f64 * 0.08 + (i as f64 * std::f64::consts::PI / 7.0).sin() * 2.5)
        .collect();

    let mut columns = vec![
        Series::new("Date", dates),
        Series::new("Commodity", vec!["Maize"; n]),
        Series::new("Market", vec!["Nairobi"; n]),
    ];
    for name in FEATURE_COLUMNS {
        // The lag/rolling features just echo the retail curve here; the demo
        // exercises the plumbing, not the feature engineering
        let values: Vec<f64> = match name {
            "Retail" => retail.clone(),
            "Wholesale_log" => retail.iter().map(|v| (v * 0.8).ln()).collect(),
            "Supply_Volume_log" => vec![7.2; n],
            "Month_sin" => vec![0.5; n],
            "Month_cos" => vec![0.866; n],
            _ => retail.iter().map(|v| v - 1.0).collect(),
        };
        columns.push(Series::new(name, values));
    }

    Ok(MarketData::from_dataframe(DataFrame::new(columns)?)?)
}
