//! Inverse scaling and timestamp alignment of predictor output.

use sibyl_types::{PredictionPoint, PredictionSeries, PriceSeries, SibylError};

use super::scaling::MinMaxNormalizer;

/// Map normalized predictor outputs back to price units.
///
/// Output `i` stays positionally aligned with window `i`.
///
/// # Errors
/// Returns `InvalidInput` if any value is non-finite.
pub fn rescale(
    predicted_normalized: &[f64],
    normalizer: &MinMaxNormalizer,
) -> Result<Vec<f64>, SibylError> {
    normalizer.inverse_transform(predicted_normalized)
}

/// Stamp rescaled predictions with the timestamps of `series[time_step..]`.
///
/// Prediction `i` belongs to source index `i + time_step`; this is the only
/// place that offset is applied.
///
/// # Errors
/// - `InvalidInput` if `time_step` is zero or `prices.len()` differs from
///   `series.len() - time_step`.
/// - `InsufficientData` if `time_step >= series.len()`.
pub fn align_predictions(
    series: &PriceSeries,
    time_step: usize,
    prices: &[f64],
) -> Result<PredictionSeries, SibylError> {
    if time_step == 0 {
        return Err(SibylError::InvalidInput(
            "time_step must be at least 1".into(),
        ));
    }
    if time_step >= series.len() {
        return Err(SibylError::insufficient(time_step + 1, series.len()));
    }
    let suffix = series.suffix(time_step);
    if prices.len() != suffix.len() {
        return Err(SibylError::shape_mismatch(
            "predictions vs series suffix",
            suffix.len(),
            prices.len(),
        ));
    }
    let points = suffix
        .iter()
        .zip(prices)
        .map(|(obs, &predicted)| PredictionPoint {
            ts: obs.ts,
            predicted,
        })
        .collect();
    PredictionSeries::new(points)
}
