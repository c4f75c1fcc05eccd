//! Stub predictors for exercising the pipeline without a trained model.

use sibyl_core::{Predictor, SibylError, WindowedDataset};

/// Returns each window's last element: a naive "tomorrow equals today" model.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastValuePredictor {
    input_len: Option<usize>,
}

impl LastValuePredictor {
    #[must_use]
    pub const fn new() -> Self {
        Self { input_len: None }
    }

    /// Pin the window length this stub claims to be built for.
    #[must_use]
    pub const fn with_input_len(len: usize) -> Self {
        Self {
            input_len: Some(len),
        }
    }
}

impl Predictor for LastValuePredictor {
    fn name(&self) -> &'static str {
        "last-value"
    }

    fn input_len(&self) -> Option<usize> {
        self.input_len
    }

    fn predict(&self, windows: &WindowedDataset) -> Result<Vec<f64>, SibylError> {
        windows
            .iter()
            .map(|w| {
                w.last()
                    .copied()
                    .ok_or_else(|| SibylError::Model("empty window".into()))
            })
            .collect()
    }
}

/// Returns the same normalized value for every window.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPredictor(pub f64);

impl Predictor for ConstantPredictor {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn predict(&self, windows: &WindowedDataset) -> Result<Vec<f64>, SibylError> {
        Ok(vec![self.0; windows.len()])
    }
}

/// Always fails with `SibylError::Model`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPredictor;

impl Predictor for FailingPredictor {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn predict(&self, _windows: &WindowedDataset) -> Result<Vec<f64>, SibylError> {
        Err(SibylError::Model("forced failure: predict".into()))
    }
}

/// Drops the final output, producing one value fewer than there are windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortPredictor;

impl Predictor for ShortPredictor {
    fn name(&self) -> &'static str {
        "short"
    }

    fn predict(&self, windows: &WindowedDataset) -> Result<Vec<f64>, SibylError> {
        Ok(windows.iter().skip(1).map(|w| w[0]).collect())
    }
}
