use std::sync::Arc;

use sibyl::ForecastReport;
use sibyl_mock::{ConstantPredictor, LastValuePredictor};

use crate::helpers::{approx_eq, mock_forecaster, series, sym, ymd};

fn last_value_report() -> ForecastReport {
    mock_forecaster(Arc::new(LastValuePredictor::new()), 3)
        .predict_series(sym("X"), series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]))
        .unwrap()
}

#[test]
fn warmup_is_the_first_window() {
    let report = last_value_report();
    assert_eq!(report.warmup_len(), 3);
    let warmup: Vec<f64> = report.warmup().iter().map(|p| p.close).collect();
    assert_eq!(warmup, vec![1.0, 2.0, 3.0]);
}

#[test]
fn errors_over_aligned_points() {
    let report = last_value_report();
    let aligned = report.aligned();
    assert_eq!(aligned.len(), 3);
    assert!(aligned.iter().all(|p| approx_eq(p.error(), -1.0)));
    assert!(approx_eq(report.mean_absolute_error().unwrap(), 1.0));
    assert!(approx_eq(report.root_mean_squared_error().unwrap(), 1.0));

    let constant = mock_forecaster(Arc::new(ConstantPredictor(0.0)), 1)
        .predict_series(sym("X"), series(&[2.0, 4.0, 6.0, 8.0]))
        .unwrap();
    assert!(approx_eq(constant.mean_absolute_error().unwrap(), 4.0));
    assert!(approx_eq(
        constant.root_mean_squared_error().unwrap(),
        (56.0_f64 / 3.0).sqrt()
    ));
}

#[test]
fn aligned_since_filters_by_calendar_date() {
    // series() starts on 2021-01-01, one observation per day
    let report = last_value_report();
    let since = report.aligned_since(ymd(2021, 1, 5));
    let dates: Vec<_> = since.iter().map(|p| p.ts.date_naive()).collect();
    assert_eq!(dates, vec![ymd(2021, 1, 5), ymd(2021, 1, 6)]);

    assert_eq!(report.aligned_since(ymd(2020, 12, 1)).len(), 3);
    assert!(report.aligned_since(ymd(2022, 1, 1)).is_empty());
}

#[test]
fn reported_honours_the_cutoff() {
    let report = last_value_report();
    assert_eq!(report.reported(), report.aligned());

    let cut = report.clone().with_report_from(ymd(2021, 1, 6));
    assert_eq!(cut.reported().len(), 1);

    // a cutoff after the last observation reports nothing
    let past = report.with_report_from(ymd(2021, 2, 1));
    assert!(past.reported().is_empty());
    assert!(past.latest().is_some());
}

#[test]
fn report_serializes_to_json() {
    let report = last_value_report();
    let json = serde_json::to_string(&report).unwrap();
    let back: ForecastReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.symbol, report.symbol);
    assert_eq!(back.predictions.len(), report.predictions.len());
    assert_eq!(back.history, report.history);
}
