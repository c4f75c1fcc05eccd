//! Pairs the windows handed to a predictor with the normalizer that produced them.

use sibyl_types::{FeatureRange, PredictionSeries, PriceSeries, SibylError};

use crate::timeseries::align::{align_predictions, rescale};
use crate::timeseries::scaling::{MinMaxNormalizer, normalize_with_range};
use crate::timeseries::window::{WindowedDataset, build_windows};

/// Predictor input plus the normalizer needed to read its output.
#[derive(Debug, Clone)]
pub struct PreparedInput {
    windows: WindowedDataset,
    normalizer: MinMaxNormalizer,
}

impl PreparedInput {
    /// Windows to feed the predictor.
    #[must_use]
    pub const fn windows(&self) -> &WindowedDataset {
        &self.windows
    }

    /// Normalizer fitted on the source series.
    #[must_use]
    pub const fn normalizer(&self) -> &MinMaxNormalizer {
        &self.normalizer
    }

    /// Window length.
    #[must_use]
    pub const fn time_step(&self) -> usize {
        self.windows.time_step()
    }

    /// Turn raw predictor output into timestamped prices.
    ///
    /// `series` must be the series this input was prepared from.
    ///
    /// # Errors
    /// - `InvalidInput` if the output count differs from the window count or an
    ///   output is non-finite.
    pub fn finish(
        &self,
        series: &PriceSeries,
        predicted_normalized: &[f64],
    ) -> Result<PredictionSeries, SibylError> {
        if predicted_normalized.len() != self.windows.len() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                expected = self.windows.len(),
                actual = predicted_normalized.len(),
                "predictor output length does not match window count"
            );
            return Err(SibylError::shape_mismatch(
                "predictor output",
                self.windows.len(),
                predicted_normalized.len(),
            ));
        }
        let prices = rescale(predicted_normalized, &self.normalizer)?;
        align_predictions(series, self.time_step(), &prices)
    }
}

/// Normalize `series` and window it.
///
/// # Errors
/// Propagates `InvalidInput` from normalization and `InsufficientData` from
/// windowing.
pub fn prepare(
    series: &PriceSeries,
    time_step: usize,
    range: FeatureRange,
) -> Result<PreparedInput, SibylError> {
    let (normalized, normalizer) = normalize_with_range(series, range)?;
    let windows = build_windows(&normalized, time_step)?;
    Ok(PreparedInput {
        windows,
        normalizer,
    })
}
