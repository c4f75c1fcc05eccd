#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sibyl::{
    DateRange, ForecastRequest, Forecaster, PricePoint, PriceSeries, PriceSource, PredictorHandle,
    Symbol,
};

/// Symbols served by `sibyl_mock::MockSource`.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const FLAT: &str = "FLAT";
pub const SHORT: &str = "SHORT";
pub const EMPTY: &str = "EMPTY";
pub const FAIL: &str = "FAIL";
pub const TIMEOUT: &str = "TIMEOUT";

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    ymd(y, m, d).and_hms_opt(0, 0, 0).unwrap().and_utc()
}

pub fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

/// Covers every mock fixture.
pub fn wide_range() -> DateRange {
    DateRange::new(ymd(2020, 1, 1), ymd(2021, 1, 1)).unwrap()
}

pub fn request(symbol: &str) -> ForecastRequest {
    ForecastRequest::new(sym(symbol), wide_range())
}

/// Daily series starting 2021-01-01 with the given closes.
pub fn series(closes: &[f64]) -> PriceSeries {
    let start = ts(2021, 1, 1);
    PriceSeries::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + chrono::Duration::days(i as i64), c))
            .collect(),
    )
    .unwrap()
}

pub fn mock_forecaster(predictor: PredictorHandle, time_step: usize) -> Forecaster {
    forecaster_with(Arc::new(sibyl_mock::MockSource::new()), predictor, time_step)
}

pub fn forecaster_with(
    source: Arc<dyn PriceSource>,
    predictor: PredictorHandle,
    time_step: usize,
) -> Forecaster {
    Forecaster::builder()
        .with_source(source)
        .with_predictor(predictor)
        .time_step(time_step)
        .build()
        .unwrap()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
