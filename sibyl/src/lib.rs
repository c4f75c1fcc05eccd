//! Sibyl forecasts closing prices with a pre-trained window regressor.
//!
//! Overview
//! - Fetches a daily closing-price history through an injected `PriceSource`.
//! - Fits a min-max normalizer on that history alone and cuts it into
//!   overlapping windows of `time_step` observations.
//! - Runs an injected `Predictor` once over all windows, maps its output back
//!   to price units and stamps each prediction with the timestamp of the
//!   observation it stands in for.
//!
//! Alignment
//! - The first `time_step` observations have no prediction; they only feed the
//!   first window. Prediction `k` pairs with observation `k + time_step`.
//! - A predictor that returns the wrong number of outputs is an error, never a
//!   silent truncation.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use sibyl::{Forecaster, ForecastRequest};
//!
//! let forecaster = Forecaster::builder()
//!     .with_source(Arc::new(MySource::new()))
//!     .with_predictor(sibyl::load_model("model.json")?)
//!     .time_step(60)
//!     .build()?;
//!
//! let report = forecaster.forecast(&ForecastRequest::default()).await?;
//! for p in report.reported() {
//!     println!("{} actual={:.2} predicted={:.2}", p.ts, p.actual, p.predicted);
//! }
//! ```
#![warn(missing_docs)]

mod core;
mod forecast;
/// Serialized linear predictor and loader.
pub mod model;
mod report;

pub use crate::core::{Forecaster, ForecasterBuilder};
pub use model::{LinearModel, load_model};
pub use report::ForecastReport;

pub use sibyl_core::{
    AlignedPoint, DEFAULT_TIME_STEP, DateRange, FeatureRange, ForecastConfig, ForecastRequest,
    MinMaxNormalizer, PredictionPoint, PredictionSeries, Predictor, PredictorHandle, PricePoint,
    PriceSeries, PriceSource, SibylError, Symbol, WindowedDataset,
};
