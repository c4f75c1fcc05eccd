//! Sibyl data transfer objects, configuration primitives and the unified error type.
#![warn(missing_docs)]

mod config;
mod error;
mod request;
mod series;

pub use config::{DEFAULT_TIME_STEP, FeatureRange, ForecastConfig};
pub use error::SibylError;
pub use request::{DateRange, ForecastRequest, Symbol};
pub use series::{AlignedPoint, PredictionPoint, PredictionSeries, PricePoint, PriceSeries};
