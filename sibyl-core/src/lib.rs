//! sibyl-core
//!
//! Core pipeline stages and collaborator traits shared across the sibyl workspace.
//!
//! - `timeseries`: min-max normalization, sliding windows, rescaling and alignment.
//! - `pipeline`: keeps a windowed dataset together with the normalizer that made it.
//! - `connector`: the `PriceSource` and `Predictor` seams.
//!
//! Alignment
//! ---------
//! Window `i` is built from observations `i .. i + time_step` and predicts the
//! observation at `i + time_step`. Predictions must therefore be zipped with
//! `series[time_step..]`; [`align_predictions`] is the single place that does so
//! and it rejects any length mismatch instead of truncating.
//!
#![warn(missing_docs)]

/// Price source and predictor traits.
pub mod connector;
/// Normalize-and-window preparation and its inverse.
pub mod pipeline;
/// Time-series stages: scaling, windowing, alignment.
pub mod timeseries;
pub mod types;

pub use connector::{PriceSource, Predictor, PredictorHandle};
pub use pipeline::{PreparedInput, prepare};
pub use timeseries::align::{align_predictions, rescale};
pub use timeseries::scaling::{MinMaxNormalizer, NormalizedSeries, normalize, normalize_with_range};
pub use timeseries::window::{WindowedDataset, build_windows};
pub use types::*;
