//! Forecast from a CSV file and pre-exported model/scaler artifacts.
//!
//! Usage:
//!   cargo run --example forecast_from_csv -- \
//!       merged_data.csv model.json scaler.json Maize Nairobi 7

use market_forecast::{DataLoader, ForecastEngine, LinearSequenceModel, MinMaxScaler};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 7 {
        eprintln!(
            "Usage: {} <data.csv> <model.json> <scaler.json> <commodity> <market> <days>",
            args[0]
        );
        std::process::exit(1);
    }

    let (csv_path, model_path, scaler_path) = (&args[1], &args[2], &args[3]);
    let (commodity, market) = (&args[4], &args[5]);
    let forecast_days: i64 = args[6].parse()?;

    // Artifacts are loaded once; a long-running host would do this at startup
    let model = Arc::new(LinearSequenceModel::from_json_file(model_path)?);
    let scaler = Arc::new(MinMaxScaler::from_json_file(scaler_path)?);
    let engine = ForecastEngine::new(model, scaler);

    let data = DataLoader::from_csv(csv_path)?;
    let forecast = engine.forecast(&data, commodity, market, forecast_days)?;

    println!("{}", forecast.to_json()?);

    Ok(())
}
