use std::path::PathBuf;
use std::sync::Arc;

use sibyl::{LinearModel, Predictor, SibylError, load_model};
use sibyl_mock::{LastValuePredictor, MockSource};

use crate::helpers::{AAPL, approx_eq, mock_forecaster, request, series, sym};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sibyl-{}-{name}.json", std::process::id()))
}

#[test]
fn artifact_roundtrips_through_json() {
    let model = LinearModel::new(vec![0.2, 0.3, 0.5], 0.01).unwrap();
    let json = model.to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["time_step"], 3);
    assert_eq!(LinearModel::from_json(&json).unwrap(), model);
}

#[test]
fn bias_defaults_to_zero() {
    let m = LinearModel::from_json(r#"{"time_step": 2, "weights": [0.5, 0.5]}"#).unwrap();
    assert_eq!(m.bias(), 0.0);
    assert_eq!(m.time_step(), 2);
}

#[test]
fn malformed_artifacts_are_model_errors() {
    for bad in [
        "not json",
        r#"{"time_step": 3, "weights": [1.0, 2.0]}"#,
        r#"{"time_step": 0, "weights": []}"#,
        r#"{"weights": [1.0]}"#,
    ] {
        let err = LinearModel::from_json(bad).expect_err(bad);
        assert!(matches!(err, SibylError::Model(_)), "{bad}: {err:?}");
    }
    assert!(matches!(
        LinearModel::new(vec![1.0, f64::INFINITY], 0.0),
        Err(SibylError::Model(_))
    ));
    assert!(matches!(
        LinearModel::new(vec![1.0], f64::NAN),
        Err(SibylError::Model(_))
    ));
    assert!(matches!(
        LinearModel::last_value(0),
        Err(SibylError::Model(_))
    ));
}

#[test]
fn load_model_reads_artifact_from_disk() {
    let path = temp_path("load");
    let model = LinearModel::last_value(60).unwrap();
    std::fs::write(&path, model.to_json().unwrap()).unwrap();

    let handle = load_model(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(handle.name(), "linear");
    assert_eq!(handle.input_len(), Some(60));
}

#[test]
fn missing_artifact_is_model_error() {
    let path = temp_path("missing");
    let err = load_model(&path).err().expect("should error");
    assert!(matches!(err, SibylError::Model(ref m) if m.contains("sibyl-")));
}

#[test]
fn predict_rejects_windows_of_other_length() {
    let model = LinearModel::last_value(4).unwrap();
    let windows = sibyl_core::build_windows(&[0.0, 0.1, 0.2, 0.3, 0.4], 3).unwrap();
    let err = model.predict(&windows).expect_err("should error");
    assert!(matches!(err, SibylError::InvalidInput(_)));
}

#[test]
fn weighted_sum_per_window() {
    let model = LinearModel::new(vec![0.5, 0.5], 0.1).unwrap();
    let windows = sibyl_core::build_windows(&[0.0, 0.2, 0.4, 0.6], 2).unwrap();
    let out = model.predict(&windows).unwrap();
    let want = [0.2, 0.4];
    assert_eq!(out.len(), want.len());
    for (o, w) in out.iter().zip(want) {
        assert!(approx_eq(*o, w), "{o} vs {w}");
    }
}

#[tokio::test]
async fn last_value_model_matches_last_value_stub() {
    let linear = mock_forecaster(Arc::new(LinearModel::last_value(60).unwrap()), 60);
    let stub = mock_forecaster(Arc::new(LastValuePredictor::new()), 60);

    let a = linear.forecast(&request(AAPL)).await.unwrap();
    let b = stub.forecast(&request(AAPL)).await.unwrap();
    assert_eq!(a.predictions.len(), b.predictions.len());
    for (x, y) in a.predictions.values().iter().zip(b.predictions.values()) {
        assert!(approx_eq(*x, y));
    }
}

#[test]
fn loaded_model_drives_predict_series() {
    let path = temp_path("drive");
    std::fs::write(
        &path,
        r#"{ "time_step": 2, "weights": [0.0, 1.0], "bias": 0.0 }"#,
    )
    .unwrap();
    let handle = load_model(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let f = sibyl::Forecaster::builder()
        .with_source(Arc::new(MockSource::new()))
        .with_predictor(handle)
        .time_step(2)
        .build()
        .unwrap();
    let report = f
        .predict_series(sym("X"), series(&[10.0, 20.0, 30.0, 40.0]))
        .unwrap();
    let values = report.predictions.values();
    assert_eq!(values.len(), 2);
    assert!(approx_eq(values[0], 20.0));
    assert!(approx_eq(values[1], 30.0));
}
