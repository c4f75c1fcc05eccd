//! Sliding-window dataset construction.

use sibyl_types::SibylError;

/// Overlapping fixed-length windows over a normalized series (stride 1).
///
/// Window `i` covers `values[i .. i + time_step]` and stands for the source
/// observation at index `i + time_step`; that value is its label. The window
/// ending on the last observation has no label and is not part of the dataset,
/// so `len() == values.len() - time_step`.
///
/// Windows borrow from a single backing buffer instead of being copied out.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedDataset {
    values: Vec<f64>,
    time_step: usize,
}

impl WindowedDataset {
    /// Number of windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() - self.time_step
    }

    /// Always false for a successfully built dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Window length; also the offset between window index and source index.
    #[must_use]
    pub const fn time_step(&self) -> usize {
        self.time_step
    }

    /// Predictor input shape `[num_windows, time_step, 1]`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.len(), self.time_step, 1)
    }

    /// Window `i`, or `None` past the end.
    #[must_use]
    pub fn window(&self, i: usize) -> Option<&[f64]> {
        if i >= self.len() {
            return None;
        }
        Some(&self.values[i..i + self.time_step])
    }

    /// Windows in chronological order, earliest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.windows(self.time_step).take(self.len())
    }

    /// Normalized value following window `i` (its training label).
    #[must_use]
    pub fn label(&self, i: usize) -> Option<f64> {
        if i >= self.len() {
            return None;
        }
        self.values.get(i + self.time_step).copied()
    }

    /// All labels, index-aligned with the windows.
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.values[self.time_step..]
    }

    /// The full normalized series backing the windows.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Owned `[num_windows][time_step]` copy for predictors that need rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter().map(<[f64]>::to_vec).collect()
    }
}

/// Slice `normalized` into overlapping windows of `time_step` values.
///
/// ```
/// use sibyl_core::build_windows;
///
/// let ds = build_windows(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert_eq!(ds.len(), 2);
/// assert_eq!(ds.window(0), Some(&[1.0, 2.0, 3.0][..]));
/// assert_eq!(ds.window(1), Some(&[2.0, 3.0, 4.0][..]));
/// assert_eq!(ds.labels(), &[4.0, 5.0]);
/// ```
///
/// # Errors
/// - `InvalidInput` if `time_step` is zero or a value is non-finite.
/// - `InsufficientData` if `time_step >= normalized.len()` (no window would have
///   a following observation).
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "sibyl_core::timeseries::build_windows",
        skip(normalized),
        fields(len = normalized.len(), time_step = time_step),
        err,
    )
)]
pub fn build_windows(normalized: &[f64], time_step: usize) -> Result<WindowedDataset, SibylError> {
    if time_step == 0 {
        return Err(SibylError::InvalidInput(
            "time_step must be at least 1".into(),
        ));
    }
    if time_step >= normalized.len() {
        return Err(SibylError::insufficient(time_step + 1, normalized.len()));
    }
    if let Some(i) = normalized.iter().position(|v| !v.is_finite()) {
        return Err(SibylError::non_finite("normalized series", i, normalized[i]));
    }
    Ok(WindowedDataset {
        values: normalized.to_vec(),
        time_step,
    })
}
