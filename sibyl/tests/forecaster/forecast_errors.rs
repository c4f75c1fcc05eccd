use std::sync::Arc;
use std::time::Duration;

use sibyl::{Forecaster, SibylError};
use sibyl_mock::{
    ConstantPredictor, DynamicMockSource, FailingPredictor, LastValuePredictor, MockBehavior,
    MockSource, ShortPredictor,
};

use crate::helpers::{
    AAPL, EMPTY, FAIL, SHORT, TIMEOUT, forecaster_with, mock_forecaster, request, series, sym,
};

#[tokio::test]
async fn empty_history_is_not_found() {
    let f = mock_forecaster(Arc::new(LastValuePredictor::new()), 60);
    let err = f.forecast(&request(EMPTY)).await.expect_err("should error");
    match err {
        SibylError::NotFound { what } => assert!(what.contains("EMPTY"), "what: {what}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_symbol_is_not_found() {
    let f = mock_forecaster(Arc::new(LastValuePredictor::new()), 60);
    let err = f.forecast(&request("NOPE")).await.expect_err("should error");
    assert!(matches!(err, SibylError::NotFound { .. }));
    assert!(err.is_user_correctable());
}

#[tokio::test]
async fn source_failure_is_propagated() {
    let f = mock_forecaster(Arc::new(LastValuePredictor::new()), 60);
    let err = f.forecast(&request(FAIL)).await.expect_err("should error");
    match err {
        SibylError::Source { source_name, msg } => {
            assert_eq!(source_name, "sibyl-mock");
            assert!(msg.contains("forced failure"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out() {
    let f = Forecaster::builder()
        .with_source(Arc::new(MockSource::new()))
        .with_predictor(Arc::new(LastValuePredictor::new()))
        .fetch_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = f.forecast(&request(TIMEOUT)).await.expect_err("should error");
    assert_eq!(err, SibylError::source_timeout("sibyl-mock"));
}

#[tokio::test(start_paused = true)]
async fn hanging_source_times_out() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("hang");
    ctrl.set_history_behavior(sym("X"), MockBehavior::Hang).await;
    let f = Forecaster::builder()
        .with_source(source)
        .with_predictor(Arc::new(LastValuePredictor::new()))
        .fetch_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let err = f.forecast(&request("X")).await.expect_err("should error");
    assert!(matches!(err, SibylError::SourceTimeout { ref source_name } if source_name == "hang"));
}

#[tokio::test]
async fn short_history_is_insufficient() {
    let f = mock_forecaster(Arc::new(LastValuePredictor::new()), 60);
    let err = f.forecast(&request(SHORT)).await.expect_err("should error");
    assert_eq!(
        err,
        SibylError::InsufficientData {
            required: 61,
            actual: 30
        }
    );
    assert!(err.is_user_correctable());
}

#[tokio::test]
async fn history_exactly_one_window_long_is_insufficient() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("dyn");
    let closes: Vec<f64> = (0..60).map(f64::from).collect();
    ctrl.set_history_behavior(sym("X"), MockBehavior::Return(series(&closes)))
        .await;
    let f = forecaster_with(source, Arc::new(LastValuePredictor::new()), 60);
    let err = f.forecast(&request("X")).await.expect_err("should error");
    assert_eq!(
        err,
        SibylError::InsufficientData {
            required: 61,
            actual: 60
        }
    );
}

#[tokio::test]
async fn non_finite_close_is_invalid_input() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("dyn");
    let mut closes: Vec<f64> = (0..80).map(|i| 10.0 + f64::from(i)).collect();
    closes[17] = f64::NAN;
    ctrl.set_history_behavior(sym("X"), MockBehavior::Return(series(&closes)))
        .await;
    let f = forecaster_with(source, Arc::new(LastValuePredictor::new()), 60);
    let err = f.forecast(&request("X")).await.expect_err("should error");
    assert!(matches!(err, SibylError::InvalidInput(ref m) if m.contains("[17]")));
}

#[tokio::test]
async fn short_predictor_output_is_rejected() {
    let f = mock_forecaster(Arc::new(ShortPredictor), 60);
    let err = f.forecast(&request(AAPL)).await.expect_err("should error");
    assert_eq!(
        err,
        SibylError::shape_mismatch("predictor output", 60, 59)
    );
}

#[tokio::test]
async fn predictor_failure_is_propagated() {
    let f = mock_forecaster(Arc::new(FailingPredictor), 60);
    let err = f.forecast(&request(AAPL)).await.expect_err("should error");
    assert!(matches!(err, SibylError::Model(_)));
    assert!(!err.is_user_correctable());
}

#[tokio::test]
async fn non_finite_prediction_is_rejected() {
    let f = mock_forecaster(Arc::new(ConstantPredictor(f64::NAN)), 60);
    let err = f.forecast(&request(AAPL)).await.expect_err("should error");
    assert!(matches!(err, SibylError::InvalidInput(_)));
}
