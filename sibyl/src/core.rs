use std::sync::Arc;
use std::time::Duration;

use sibyl_core::{FeatureRange, ForecastConfig, PriceSource, PredictorHandle, SibylError};

/// Orchestrator that drives one forecast request end to end.
///
/// Holds an injected price source and a predictor handle loaded once by the
/// caller; no process-wide state is involved.
pub struct Forecaster {
    pub(crate) source: Arc<dyn PriceSource>,
    pub(crate) predictor: PredictorHandle,
    pub(crate) cfg: ForecastConfig,
}

/// Builder for constructing a `Forecaster` with custom configuration.
pub struct ForecasterBuilder {
    source: Option<Arc<dyn PriceSource>>,
    predictor: Option<PredictorHandle>,
    cfg: ForecastConfig,
}

impl Default for ForecasterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecasterBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 60-step windows, `[0, 1]` normalization, 30s fetch timeout.
    /// A source and a predictor must be registered before [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            predictor: None,
            cfg: ForecastConfig::default(),
        }
    }

    /// Register the price data source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Register the predictor handle (see [`crate::load_model`]).
    #[must_use]
    pub fn with_predictor(mut self, predictor: PredictorHandle) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ForecastConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the window length fed to the predictor.
    ///
    /// Must match the predictor's own input length when it declares one.
    #[must_use]
    pub const fn time_step(mut self, time_step: usize) -> Self {
        self.cfg.time_step = time_step;
        self
    }

    /// Set the target range of the per-request normalizer.
    #[must_use]
    pub const fn feature_range(mut self, range: FeatureRange) -> Self {
        self.cfg.feature_range = range;
        self
    }

    /// Set the upper bound on a single history fetch.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.fetch_timeout = timeout;
        self
    }

    /// Build the `Forecaster`.
    ///
    /// # Errors
    /// Returns `InvalidInput` if no source or predictor was registered, the
    /// configuration is invalid, or the predictor declares an input length
    /// different from `time_step`.
    pub fn build(self) -> Result<Forecaster, SibylError> {
        let source = self.source.ok_or_else(|| {
            SibylError::InvalidInput(
                "no price source registered; add one via with_source(...)".to_string(),
            )
        })?;
        let predictor = self.predictor.ok_or_else(|| {
            SibylError::InvalidInput(
                "no predictor registered; add one via with_predictor(...)".to_string(),
            )
        })?;

        self.cfg.validate()?;

        if let Some(expected) = predictor.input_len()
            && expected != self.cfg.time_step
        {
            return Err(SibylError::InvalidInput(format!(
                "predictor {} expects windows of {expected} steps but time_step is {}",
                predictor.name(),
                self.cfg.time_step
            )));
        }

        Ok(Forecaster {
            source,
            predictor,
            cfg: self.cfg,
        })
    }
}

impl Forecaster {
    /// Start building a new `Forecaster`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let model = sibyl::load_model("model.json")?;
    /// let forecaster = sibyl::Forecaster::builder()
    ///     .with_source(Arc::new(MySource::new()))
    ///     .with_predictor(model)
    ///     .time_step(60)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ForecasterBuilder {
        ForecasterBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ForecastConfig {
        &self.cfg
    }

    /// Name of the registered price source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Name of the registered predictor.
    #[must_use]
    pub fn predictor_name(&self) -> &'static str {
        self.predictor.name()
    }

    /// Wrap a source future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sibyl::core::source_call_with_timeout",
            skip(fut),
            fields(
                source = source_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn source_call_with_timeout<T, Fut>(
        source_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, SibylError>
    where
        Fut: core::future::Future<Output = Result<T, SibylError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(SibylError::source_timeout(source_name)))
    }
}
