use std::sync::Arc;
use std::time::Duration;

use sibyl::{FeatureRange, ForecastConfig, Forecaster, LinearModel, SibylError};
use sibyl_mock::{LastValuePredictor, MockSource};

#[test]
fn build_without_source_is_rejected() {
    let err = Forecaster::builder()
        .with_predictor(Arc::new(LastValuePredictor::new()))
        .build()
        .err()
        .expect("should error");
    assert!(matches!(err, SibylError::InvalidInput(ref m) if m.contains("price source")));
}

#[test]
fn build_without_predictor_is_rejected() {
    let err = Forecaster::builder()
        .with_source(Arc::new(MockSource::new()))
        .build()
        .err()
        .expect("should error");
    assert!(matches!(err, SibylError::InvalidInput(ref m) if m.contains("predictor")));
}

#[test]
fn build_rejects_invalid_config() {
    let base = || {
        Forecaster::builder()
            .with_source(Arc::new(MockSource::new()))
            .with_predictor(Arc::new(LastValuePredictor::new()))
    };

    let zero_step = base().time_step(0).build().err();
    assert!(matches!(zero_step, Some(SibylError::InvalidInput(_))));

    let zero_timeout = base().fetch_timeout(Duration::ZERO).build().err();
    assert!(matches!(zero_timeout, Some(SibylError::InvalidInput(_))));

    let inverted = base()
        .feature_range(FeatureRange {
            lower: 1.0,
            upper: 0.0,
        })
        .build()
        .err();
    assert!(matches!(inverted, Some(SibylError::InvalidInput(_))));
}

#[test]
fn build_rejects_predictor_with_other_window_length() {
    let err = Forecaster::builder()
        .with_source(Arc::new(MockSource::new()))
        .with_predictor(Arc::new(LinearModel::last_value(30).unwrap()))
        .time_step(60)
        .build()
        .err()
        .expect("should error");
    match err {
        SibylError::InvalidInput(m) => {
            assert!(m.contains("30"), "message: {m}");
            assert!(m.contains("60"), "message: {m}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn defaults_and_overrides_are_visible() {
    let f = Forecaster::builder()
        .with_source(Arc::new(MockSource::new()))
        .with_predictor(Arc::new(LastValuePredictor::with_input_len(60)))
        .build()
        .unwrap();
    assert_eq!(f.config().time_step, 60);
    assert_eq!(f.config().feature_range, FeatureRange::UNIT);
    assert_eq!(f.config().fetch_timeout, Duration::from_secs(30));
    assert_eq!(f.source_name(), "sibyl-mock");
    assert_eq!(f.predictor_name(), "last-value");

    let cfg = ForecastConfig {
        time_step: 5,
        feature_range: FeatureRange::new(-1.0, 1.0).unwrap(),
        fetch_timeout: Duration::from_millis(250),
    };
    let f = Forecaster::builder()
        .with_source(Arc::new(MockSource::new()))
        .with_predictor(Arc::new(LastValuePredictor::new()))
        .config(cfg.clone())
        .build()
        .unwrap();
    assert_eq!(f.config().time_step, cfg.time_step);
    assert_eq!(f.config().feature_range, cfg.feature_range);
    assert_eq!(f.config().fetch_timeout, cfg.fetch_timeout);
}
