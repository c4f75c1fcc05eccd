use std::sync::Arc;

use async_trait::async_trait;

use crate::timeseries::window::WindowedDataset;
use sibyl_types::{DateRange, PriceSeries, SibylError, Symbol};

/// Supplier of chronological closing prices.
///
/// Implementations may return an empty series when nothing is available for
/// the range; the orchestrator decides how to surface that. Transport failures
/// should be reported as `SibylError::Source`.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Stable name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Fetch closing prices for `symbol` over `range`.
    async fn history(&self, symbol: &Symbol, range: DateRange) -> Result<PriceSeries, SibylError>;
}

/// A loaded time-series regressor.
///
/// Receives a windowed dataset shaped `[num_windows, time_step, 1]` and returns
/// exactly one normalized scalar per window, in window order.
pub trait Predictor: Send + Sync {
    /// Stable name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Window length the predictor was built for, if it is fixed.
    fn input_len(&self) -> Option<usize> {
        None
    }

    /// Predict one normalized value per window.
    ///
    /// # Errors
    /// Implementations return `SibylError::Model` on inference failure.
    fn predict(&self, windows: &WindowedDataset) -> Result<Vec<f64>, SibylError>;
}

/// Shared handle to a predictor loaded once and injected where needed.
pub type PredictorHandle = Arc<dyn Predictor>;
