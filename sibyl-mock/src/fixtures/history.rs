use chrono::{Datelike, NaiveDate, Weekday};
use sibyl_core::{PricePoint, PriceSeries};

/// First fixture trading day.
pub const START: (i32, u32, u32) = (2020, 6, 1);

pub fn by_symbol(s: &str) -> Option<PriceSeries> {
    match s {
        "AAPL" => Some(build(120, |i| 100.0 + 0.25 * i + 5.0 * (i / 7.0).sin())),
        "MSFT" => Some(build(90, |i| 200.0 - 0.1 * i + 3.0 * (i / 5.0).cos())),
        "FLAT" => Some(build(70, |_| 100.0)),
        "SHORT" => Some(build(30, |i| 50.0 + i)),
        "EMPTY" => Some(PriceSeries::default()),
        _ => None,
    }
}

/// Weekdays starting at [`START`], one close per day.
fn business_days(count: usize) -> impl Iterator<Item = NaiveDate> {
    let (y, m, d) = START;
    let start = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(count)
}

fn build(count: usize, close: impl Fn(f64) -> f64) -> PriceSeries {
    let points = business_days(count)
        .enumerate()
        .map(|(i, date)| {
            PricePoint::new(
                date.and_hms_opt(0, 0, 0).unwrap().and_utc(),
                close(i as f64),
            )
        })
        .collect();
    PriceSeries::new(points).unwrap()
}
