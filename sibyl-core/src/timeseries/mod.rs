//! Time-series stages of the forecasting pipeline.
//!
//! Modules include:
//! - `scaling`: fit a min-max normalizer and transform closes
//! - `window`: slice a normalized series into overlapping windows
//! - `align`: inverse-scale predictor output and stamp it with source timestamps
/// Inverse scaling and timestamp alignment.
pub mod align;
/// Min-max normalization.
pub mod scaling;
/// Sliding-window dataset construction.
pub mod window;
