//! Re-export of foundational types from `sibyl-types`.
// Consolidated re-exports so downstream crates can depend on `sibyl-core` only

pub use sibyl_types::{
    AlignedPoint, DEFAULT_TIME_STEP, DateRange, FeatureRange, ForecastConfig, ForecastRequest,
    PredictionPoint, PredictionSeries, PricePoint, PriceSeries, SibylError, Symbol,
};
