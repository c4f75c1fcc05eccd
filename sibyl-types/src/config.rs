//! Configuration types shared by the pipeline and the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SibylError;

/// Default window length: number of past observations used to predict the next one.
pub const DEFAULT_TIME_STEP: usize = 60;

/// Target range of the min-max normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureRange", into = "RawFeatureRange")]
pub struct FeatureRange {
    /// Value the fitted minimum maps to.
    pub lower: f64,
    /// Value the fitted maximum maps to.
    pub upper: f64,
}

impl FeatureRange {
    /// The unit interval `[0, 1]`.
    pub const UNIT: Self = Self {
        lower: 0.0,
        upper: 1.0,
    };

    /// Build a validated range.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless both bounds are finite and `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, SibylError> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    /// Distance between the bounds.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check the range invariants.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless both bounds are finite and `lower < upper`.
    pub fn validate(&self) -> Result<(), SibylError> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(SibylError::InvalidInput(format!(
                "feature range bounds must be finite, got ({}, {})",
                self.lower, self.upper
            )));
        }
        if self.lower >= self.upper {
            return Err(SibylError::InvalidInput(format!(
                "feature range lower bound must be below upper bound, got ({}, {})",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawFeatureRange {
    lower: f64,
    upper: f64,
}

impl TryFrom<RawFeatureRange> for FeatureRange {
    type Error = SibylError;

    fn try_from(raw: RawFeatureRange) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

impl From<FeatureRange> for RawFeatureRange {
    fn from(r: FeatureRange) -> Self {
        Self {
            lower: r.lower,
            upper: r.upper,
        }
    }
}

impl Default for FeatureRange {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Global configuration for the `Forecaster` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Window length fed to the predictor.
    pub time_step: usize,
    /// Target range of the normalizer fitted per request.
    pub feature_range: FeatureRange,
    /// Upper bound on a single price-history fetch.
    pub fetch_timeout: Duration,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            feature_range: FeatureRange::UNIT,
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

impl ForecastConfig {
    /// Check configuration invariants.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a zero `time_step`, a zero timeout, or an invalid
    /// feature range.
    pub fn validate(&self) -> Result<(), SibylError> {
        if self.time_step == 0 {
            return Err(SibylError::InvalidInput(
                "time_step must be at least 1".to_string(),
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(SibylError::InvalidInput(
                "fetch_timeout must be non-zero".to_string(),
            ));
        }
        self.feature_range.validate()
    }
}
