use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use market_forecast::{
    DataLoader, ForecastEngine, ForecastError, LinearSequenceModel, MinMaxScaler, FEATURE_COUNT,
    WINDOW_SIZE,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

// Helper to create a historical dataset: 48 daily rows for Maize/Nairobi
// ending 2025-02-17, plus a Beans row that must be filtered out
fn create_sample_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(
        file,
        "Date,Commodity,Market,Retail,Wholesale_log,Supply_Volume_log,Retail_Lag1,Retail_Lag7,Retail_Rolling3,Wholesale_Rolling3,Month_sin,Month_cos"
    )
    .unwrap();

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for i in 0..48 {
        let date = start + chrono::Duration::days(i);
        let retail = 50.0 + (i as f64 * 0.5).sin() * 4.0;
        writeln!(
            file,
            "{},Maize,Nairobi,{:.4},3.9,7.2,{:.4},{:.4},{:.4},48.0,0.5,0.87",
            date,
            retail,
            retail - 1.0,
            retail - 2.0,
            retail - 0.5
        )
        .unwrap();
    }
    writeln!(
        file,
        "2025-02-10,Beans,Nairobi,120.0,4.5,6.8,119.0,115.0,118.0,110.0,0.5,0.87"
    )
    .unwrap();

    file
}

// Persistence weights: the prediction copies the newest row's price, so in
// normalized space every rollout step repeats the last observed value
fn persistence_model() -> LinearSequenceModel {
    let mut weights = vec![0.0; WINDOW_SIZE * FEATURE_COUNT];
    weights[(WINDOW_SIZE - 1) * FEATURE_COUNT] = 1.0;
    LinearSequenceModel::new(WINDOW_SIZE, FEATURE_COUNT, weights, 0.0).unwrap()
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Create sample data file
    let data_file = create_sample_csv();

    // 2. Load data
    let data = DataLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(data.len(), 49);

    // 3. Fit a scaler on the pair's feature matrix (stands in for the
    //    artifact exported by the training pipeline)
    let matrix = data.feature_matrix("Maize", "Nairobi").unwrap();
    assert_eq!(matrix.len(), 48);
    let last_retail = matrix.rows().last().unwrap()[0];
    let scaler = MinMaxScaler::fit(&matrix).unwrap();

    // 4. Wire the engine and forecast three days
    let engine = ForecastEngine::new(Arc::new(persistence_model()), Arc::new(scaler));
    let forecast = engine.forecast(&data, "Maize", "Nairobi", 3).unwrap();

    // 5. Dates start the day after the dataset's maximum date
    let dates: Vec<NaiveDate> = forecast.points.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 2, 18).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 19).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
        ]
    );

    // 6. A persistence model forecasts the last observed retail price
    for point in &forecast.points {
        assert!(point.predicted_price.is_finite());
        assert_approx_eq!(point.predicted_price, last_retail, 1e-9);
    }

    // 7. Serialized form carries the request identifiers
    let json = forecast.to_json().unwrap();
    assert!(json.contains("Maize"));
    assert!(json.contains("Nairobi"));

    // 8. Unknown pairs surface NoDataAvailable
    let result = engine.forecast(&data, "NoSuchCommodity", "NoSuchMarket", 5);
    assert!(matches!(
        result,
        Err(ForecastError::NoDataAvailable { .. })
    ));

    // 9. Missing file surfaces an IO error
    let result = DataLoader::from_csv("/nonexistent/path.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}

#[test]
fn test_artifact_based_workflow() {
    let data_file = create_sample_csv();
    let data = DataLoader::from_csv(data_file.path()).unwrap();

    // Export model and scaler artifacts, then reload them the way a host
    // process would at startup
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    let scaler_path = dir.path().join("scaler.json");

    let matrix = data.feature_matrix("Maize", "Nairobi").unwrap();
    persistence_model().to_json_file(&model_path).unwrap();
    MinMaxScaler::fit(&matrix)
        .unwrap()
        .to_json_file(&scaler_path)
        .unwrap();

    let model = Arc::new(LinearSequenceModel::from_json_file(&model_path).unwrap());
    let scaler = Arc::new(MinMaxScaler::from_json_file(&scaler_path).unwrap());
    let engine = ForecastEngine::new(model, scaler);

    let forecast = engine.forecast(&data, "Maize", "Nairobi", 7).unwrap();
    assert_eq!(forecast.len(), 7);

    // Same engine, same inputs, same forecast
    let again = engine.forecast(&data, "Maize", "Nairobi", 7).unwrap();
    assert_eq!(forecast.points, again.points);
}
