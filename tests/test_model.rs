use assert_approx_eq::assert_approx_eq;
use market_forecast::error::ForecastError;
use market_forecast::model::{LinearSequenceModel, SequenceModel};
use market_forecast::{FEATURE_COUNT, WINDOW_SIZE};
use tempfile::tempdir;

// Weights that copy the newest row's price through: a persistence model
fn persistence_model() -> LinearSequenceModel {
    let mut weights = vec![0.0; WINDOW_SIZE * FEATURE_COUNT];
    weights[(WINDOW_SIZE - 1) * FEATURE_COUNT] = 1.0;
    LinearSequenceModel::new(WINDOW_SIZE, FEATURE_COUNT, weights, 0.0).unwrap()
}

fn constant_window(price: f64) -> Vec<Vec<f64>> {
    let mut row = vec![0.0; FEATURE_COUNT];
    row[0] = price;
    vec![row; WINDOW_SIZE]
}

#[test]
fn test_new_validates_weight_shape() {
    let result = LinearSequenceModel::new(WINDOW_SIZE, FEATURE_COUNT, vec![0.0; 3], 0.0);
    assert!(matches!(
        result,
        Err(ForecastError::FeatureCountMismatch {
            expected: 126,
            actual: 3
        })
    ));
}

#[test]
fn test_predict_is_deterministic() {
    let model = persistence_model();
    let window = constant_window(0.42);

    let first = model.predict_next(&window).unwrap();
    let second = model.predict_next(&window).unwrap();
    assert_approx_eq!(first, 0.42, 1e-12);
    assert_approx_eq!(first, second, 1e-12);
}

#[test]
fn test_bias_contributes() {
    let weights = vec![0.0; WINDOW_SIZE * FEATURE_COUNT];
    let model = LinearSequenceModel::new(WINDOW_SIZE, FEATURE_COUNT, weights, 0.25).unwrap();

    let predicted = model.predict_next(&constant_window(0.9)).unwrap();
    assert_approx_eq!(predicted, 0.25, 1e-12);
}

#[test]
fn test_predict_rejects_wrong_window_shape() {
    let model = persistence_model();

    let short = vec![vec![0.0; FEATURE_COUNT]; WINDOW_SIZE - 1];
    assert!(matches!(
        model.predict_next(&short),
        Err(ForecastError::FeatureCountMismatch { .. })
    ));

    let narrow = vec![vec![0.0; FEATURE_COUNT - 1]; WINDOW_SIZE];
    assert!(matches!(
        model.predict_next(&narrow),
        Err(ForecastError::FeatureCountMismatch { .. })
    ));
}

#[test]
fn test_non_finite_prediction_is_failure() {
    let model = persistence_model();
    let window = constant_window(f64::INFINITY);

    assert!(matches!(
        model.predict_next(&window),
        Err(ForecastError::PredictionFailure(_))
    ));
}

#[test]
fn test_json_artifact_round_trip() {
    let model = persistence_model();

    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    model.to_json_file(&path).unwrap();

    let loaded = LinearSequenceModel::from_json_file(&path).unwrap();
    assert_eq!(loaded.window_size(), WINDOW_SIZE);
    assert_eq!(loaded.n_features(), FEATURE_COUNT);

    let window = constant_window(0.7);
    assert_approx_eq!(
        model.predict_next(&window).unwrap(),
        loaded.predict_next(&window).unwrap(),
        1e-12
    );
}

#[test]
fn test_malformed_artifact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "{\"not\": \"a model\"}").unwrap();

    assert!(matches!(
        LinearSequenceModel::from_json_file(&path),
        Err(ForecastError::JsonError(_))
    ));
}
