use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sibyl_core::{AlignedPoint, MinMaxNormalizer, PredictionSeries, PriceSeries, Symbol};

/// Result of one forecast: the fetched history, the fitted normalizer and the
/// predictions aligned to the history's timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Ticker the report was produced for.
    pub symbol: Symbol,
    /// Window length used.
    pub time_step: usize,
    /// Price history the predictor was run on.
    pub history: PriceSeries,
    /// Normalizer fitted on `history`.
    pub normalizer: MinMaxNormalizer,
    /// One prediction per observation after the first `time_step`.
    pub predictions: PredictionSeries,
    /// Cutoff applied by [`reported`](Self::reported), if any.
    pub report_from: Option<NaiveDate>,
}

impl ForecastReport {
    /// Attach a reporting cutoff.
    #[must_use]
    pub const fn with_report_from(mut self, date: NaiveDate) -> Self {
        self.report_from = Some(date);
        self
    }

    /// Number of leading observations that have no prediction.
    #[must_use]
    pub const fn warmup_len(&self) -> usize {
        self.time_step
    }

    /// Observations that only served as model input.
    #[must_use]
    pub fn warmup(&self) -> &[sibyl_core::PricePoint] {
        &self.history.points()[..self.time_step.min(self.history.len())]
    }

    /// Every prediction next to the actual close it stands in for.
    #[must_use]
    pub fn aligned(&self) -> Vec<AlignedPoint> {
        self.predictions.zip_actual(&self.history)
    }

    /// Aligned points dated on or after `date` (UTC calendar date).
    #[must_use]
    pub fn aligned_since(&self, date: NaiveDate) -> Vec<AlignedPoint> {
        self.aligned()
            .into_iter()
            .filter(|p| p.ts.date_naive() >= date)
            .collect()
    }

    /// Aligned points after applying `report_from`; all of them when unset.
    ///
    /// A cutoff past the end of the history yields an empty vector.
    #[must_use]
    pub fn reported(&self) -> Vec<AlignedPoint> {
        match self.report_from {
            Some(date) => self.aligned_since(date),
            None => self.aligned(),
        }
    }

    /// Most recent aligned point.
    #[must_use]
    pub fn latest(&self) -> Option<AlignedPoint> {
        self.aligned().pop()
    }

    /// Mean absolute error over all aligned points, `None` when there are none.
    #[must_use]
    pub fn mean_absolute_error(&self) -> Option<f64> {
        mean(self.aligned().iter().map(|p| p.error().abs()))
    }

    /// Root mean squared error over all aligned points, `None` when there are none.
    #[must_use]
    pub fn root_mean_squared_error(&self) -> Option<f64> {
        mean(self.aligned().iter().map(|p| p.error().powi(2))).map(f64::sqrt)
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
