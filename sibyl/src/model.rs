//! Serialized linear window regressor and the model loader.
//!
//! The artifact is a JSON document:
//!
//! ```json
//! { "time_step": 3, "weights": [0.2, 0.3, 0.5], "bias": 0.0 }
//! ```
//!
//! `weights[j]` multiplies the `j`-th (oldest first) element of each window.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sibyl_core::{Predictor, PredictorHandle, SibylError, WindowedDataset};

#[derive(Serialize, Deserialize)]
struct LinearModelFile {
    time_step: usize,
    weights: Vec<f64>,
    #[serde(default)]
    bias: f64,
}

/// Linear regressor over one window: `bias + sum(weights[j] * window[j])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinearModelFile", into = "LinearModelFile")]
pub struct LinearModel {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearModel {
    /// Build a model; its window length is `weights.len()`.
    ///
    /// # Errors
    /// Returns `Model` if `weights` is empty or any coefficient is non-finite.
    pub fn new(weights: Vec<f64>, bias: f64) -> Result<Self, SibylError> {
        if weights.is_empty() {
            return Err(SibylError::Model("linear model has no weights".into()));
        }
        if let Some(i) = weights.iter().position(|w| !w.is_finite()) {
            return Err(SibylError::Model(format!(
                "weights[{i}] is not finite ({})",
                weights[i]
            )));
        }
        if !bias.is_finite() {
            return Err(SibylError::Model(format!("bias is not finite ({bias})")));
        }
        Ok(Self { weights, bias })
    }

    /// Model that repeats the last element of each window.
    ///
    /// # Errors
    /// Returns `Model` if `time_step` is zero.
    pub fn last_value(time_step: usize) -> Result<Self, SibylError> {
        let mut weights = vec![0.0; time_step];
        if let Some(last) = weights.last_mut() {
            *last = 1.0;
        }
        Self::new(weights, 0.0)
    }

    /// Window length the model was built for.
    #[must_use]
    pub fn time_step(&self) -> usize {
        self.weights.len()
    }

    /// Coefficients, oldest window element first.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Intercept.
    #[must_use]
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    /// Parse a model artifact.
    ///
    /// # Errors
    /// Returns `Model` on malformed JSON or an inconsistent artifact.
    pub fn from_json(s: &str) -> Result<Self, SibylError> {
        serde_json::from_str(s).map_err(|e| SibylError::Model(format!("invalid model artifact: {e}")))
    }

    /// Serialize to the artifact format.
    ///
    /// # Errors
    /// Returns `Model` if serialization fails.
    pub fn to_json(&self) -> Result<String, SibylError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SibylError::Model(format!("serialize model: {e}")))
    }

    /// Read and parse an artifact from disk.
    ///
    /// # Errors
    /// Returns `Model` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SibylError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SibylError::Model(format!("read {}: {e}", path.display())))?;
        let model = Self::from_json(&text)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sibyl::model",
            path = %path.display(),
            time_step = model.time_step(),
            "loaded linear model"
        );

        Ok(model)
    }

    fn score(&self, window: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(window)
            .fold(self.bias, |acc, (w, x)| w.mul_add(*x, acc))
    }
}

impl TryFrom<LinearModelFile> for LinearModel {
    type Error = SibylError;

    fn try_from(raw: LinearModelFile) -> Result<Self, Self::Error> {
        if raw.weights.len() != raw.time_step {
            return Err(SibylError::Model(format!(
                "time_step is {} but {} weights were given",
                raw.time_step,
                raw.weights.len()
            )));
        }
        Self::new(raw.weights, raw.bias)
    }
}

impl From<LinearModel> for LinearModelFile {
    fn from(m: LinearModel) -> Self {
        Self {
            time_step: m.weights.len(),
            weights: m.weights,
            bias: m.bias,
        }
    }
}

impl Predictor for LinearModel {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.time_step())
    }

    fn predict(&self, windows: &WindowedDataset) -> Result<Vec<f64>, SibylError> {
        if windows.time_step() != self.time_step() {
            return Err(SibylError::shape_mismatch(
                "window length",
                self.time_step(),
                windows.time_step(),
            ));
        }
        Ok(windows.iter().map(|w| self.score(w)).collect())
    }
}

/// Load a predictor artifact from `path`, once, for injection into a
/// [`Forecaster`](crate::Forecaster).
///
/// # Errors
/// Returns `Model` if the artifact is missing or malformed.
pub fn load_model(path: impl AsRef<Path>) -> Result<PredictorHandle, SibylError> {
    Ok(Arc::new(LinearModel::load(path)?))
}
