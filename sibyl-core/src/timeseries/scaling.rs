//! Min-max normalization fitted per price series.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use sibyl_types::{FeatureRange, PriceSeries, SibylError};

fn ensure_finite(what: &str, values: &[f64]) -> Result<(), SibylError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(SibylError::non_finite(what, i, values[i])),
        None => Ok(()),
    }
}

/// Linear transform mapping a fitted `[data_min, data_max]` onto a target range.
///
/// For a degenerate fit (`data_min == data_max`) the forward transform returns
/// the lower bound for every input and the inverse returns `data_min`, so no
/// division by zero can occur.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNormalizer", into = "RawNormalizer")]
pub struct MinMaxNormalizer {
    data_min: f64,
    data_max: f64,
    range: FeatureRange,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawNormalizer {
    data_min: f64,
    data_max: f64,
    range: FeatureRange,
}

impl TryFrom<RawNormalizer> for MinMaxNormalizer {
    type Error = SibylError;

    fn try_from(raw: RawNormalizer) -> Result<Self, Self::Error> {
        Self::from_parts(raw.data_min, raw.data_max, raw.range)
    }
}

impl From<MinMaxNormalizer> for RawNormalizer {
    fn from(n: MinMaxNormalizer) -> Self {
        Self {
            data_min: n.data_min,
            data_max: n.data_max,
            range: n.range,
        }
    }
}

impl MinMaxNormalizer {
    /// Fit on the observed minimum and maximum of `values`.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `values` is empty, contains a non-finite value,
    /// spans more than `f64` can represent, or `range` is not a valid feature range.
    pub fn fit(values: &[f64], range: FeatureRange) -> Result<Self, SibylError> {
        range.validate()?;
        if values.is_empty() {
            return Err(SibylError::InvalidInput(
                "cannot fit a normalizer on an empty series".into(),
            ));
        }
        ensure_finite("series", values)?;

        let (data_min, data_max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        Self::from_parts(data_min, data_max, range)
    }

    /// Rebuild a normalizer from previously fitted bounds.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a bound is non-finite, `data_min > data_max`,
    /// `data_max - data_min` overflows, or `range` is not a valid feature range.
    pub fn from_parts(data_min: f64, data_max: f64, range: FeatureRange) -> Result<Self, SibylError> {
        range.validate()?;
        if !data_min.is_finite() || !data_max.is_finite() {
            return Err(SibylError::InvalidInput(format!(
                "fitted bounds must be finite, got ({data_min}, {data_max})"
            )));
        }
        if data_min > data_max {
            return Err(SibylError::InvalidInput(format!(
                "fitted minimum {data_min} exceeds maximum {data_max}"
            )));
        }
        if !(data_max - data_min).is_finite() {
            return Err(SibylError::InvalidInput(format!(
                "price span overflows f64: [{data_min}, {data_max}]"
            )));
        }
        Ok(Self {
            data_min,
            data_max,
            range,
        })
    }

    /// Smallest fitted value.
    #[must_use]
    pub const fn data_min(&self) -> f64 {
        self.data_min
    }

    /// Largest fitted value.
    #[must_use]
    pub const fn data_max(&self) -> f64 {
        self.data_max
    }

    /// Target range.
    #[must_use]
    pub const fn feature_range(&self) -> FeatureRange {
        self.range
    }

    /// True when every fitted value was identical.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.data_max == self.data_min
    }

    /// Map a price into the target range. Values outside the fitted range
    /// extrapolate linearly.
    #[must_use]
    pub fn forward(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return self.range.lower;
        }
        (x - self.data_min) / (self.data_max - self.data_min) * self.range.span() + self.range.lower
    }

    /// Map a normalized value back to price units.
    #[must_use]
    pub fn inverse(&self, y: f64) -> f64 {
        if self.is_degenerate() {
            return self.data_min;
        }
        (y - self.range.lower) / self.range.span() * (self.data_max - self.data_min) + self.data_min
    }

    /// Apply [`forward`](Self::forward) to every value.
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the first non-finite value.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, SibylError> {
        ensure_finite("series", values)?;
        Ok(values.iter().map(|&x| self.forward(x)).collect())
    }

    /// Apply [`inverse`](Self::inverse) to every value.
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the first non-finite input, or the first
    /// output that overflows when extrapolating far outside the target range.
    pub fn inverse_transform(&self, values: &[f64]) -> Result<Vec<f64>, SibylError> {
        ensure_finite("prediction", values)?;
        let out: Vec<f64> = values.iter().map(|&y| self.inverse(y)).collect();
        ensure_finite("rescaled prediction", &out)?;
        Ok(out)
    }
}

/// Normalized closing prices, index-aligned with the source series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSeries(Vec<f64>);

impl NormalizedSeries {
    /// Consume into the underlying values.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for NormalizedSeries {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<f64>> for NormalizedSeries {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

/// Fit a `[0, 1]` normalizer on `series` and transform its closes.
///
/// # Errors
/// Returns `InvalidInput` if the series is empty or holds a non-finite close.
pub fn normalize(series: &PriceSeries) -> Result<(NormalizedSeries, MinMaxNormalizer), SibylError> {
    normalize_with_range(series, FeatureRange::UNIT)
}

/// Fit a normalizer with a custom target range and transform the closes.
///
/// # Errors
/// Returns `InvalidInput` if the series is empty, holds a non-finite close, or
/// the range is invalid.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "sibyl_core::timeseries::normalize",
        skip(series),
        fields(len = series.len(), lower = range.lower, upper = range.upper),
        err,
    )
)]
pub fn normalize_with_range(
    series: &PriceSeries,
    range: FeatureRange,
) -> Result<(NormalizedSeries, MinMaxNormalizer), SibylError> {
    let closes = series.closes();
    let normalizer = MinMaxNormalizer::fit(&closes, range)?;
    #[cfg(feature = "tracing")]
    if normalizer.is_degenerate() {
        tracing::debug!(
            value = normalizer.data_min(),
            "flat series; every close maps to the lower bound"
        );
    }
    let values = normalizer.transform(&closes)?;
    Ok((NormalizedSeries(values), normalizer))
}
