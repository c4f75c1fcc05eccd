use crate::{ForecastReport, Forecaster};
use sibyl_core::{ForecastRequest, PriceSeries, SibylError, Symbol, prepare};

impl Forecaster {
    /// Fetch history for `req`, run the predictor over it and align the output.
    ///
    /// Behavior:
    /// - The fetch is bounded by the configured `fetch_timeout`.
    /// - A source that answers with an empty series is treated as "not found".
    /// - Everything after the fetch is synchronous; see [`predict_series`](Self::predict_series).
    ///
    /// # Errors
    /// - `SourceTimeout` if the fetch exceeds the timeout.
    /// - `Source` / `NotFound` as reported by the source, or `NotFound` for an
    ///   empty history.
    /// - `InsufficientData` when the history has no more than `time_step` points.
    /// - `Model` or `InvalidInput` when the predictor fails or misbehaves.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "sibyl::forecast",
            skip(self, req),
            fields(symbol = %req.symbol, range = %req.range, time_step = self.cfg.time_step),
            err,
        )
    )]
    pub async fn forecast(&self, req: &ForecastRequest) -> Result<ForecastReport, SibylError> {
        let series = Self::source_call_with_timeout(
            self.source.name(),
            self.cfg.fetch_timeout,
            self.source.history(&req.symbol, req.range),
        )
        .await?;

        if series.is_empty() {
            return Err(SibylError::not_found(format!(
                "price history for {} in {}",
                req.symbol, req.range
            )));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sibyl::forecast",
            source = self.source.name(),
            points = series.len(),
            "fetched price history"
        );

        let report = self.predict_series(req.symbol.clone(), series)?;
        Ok(match req.report_from {
            Some(date) => report.with_report_from(date),
            None => report,
        })
    }

    /// Run the pipeline on an already-fetched series.
    ///
    /// Normalizes with a normalizer fitted on `series` alone, windows the
    /// result, invokes the predictor once over all windows, rescales and
    /// aligns. The series is taken by value and kept in the returned report.
    ///
    /// # Errors
    /// Same as [`forecast`](Self::forecast) minus the fetch-related variants.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "sibyl::forecast",
            skip(self, symbol, series),
            fields(symbol = %symbol, points = series.len(), predictor = self.predictor.name()),
            err,
        )
    )]
    pub fn predict_series(
        &self,
        symbol: Symbol,
        series: PriceSeries,
    ) -> Result<ForecastReport, SibylError> {
        let input = prepare(&series, self.cfg.time_step, self.cfg.feature_range)?;
        let raw = self.predictor.predict(input.windows())?;
        let predictions = input.finish(&series, &raw)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sibyl::forecast",
            windows = input.windows().len(),
            degenerate = input.normalizer().is_degenerate(),
            "aligned predictions"
        );

        Ok(ForecastReport {
            symbol,
            time_step: self.cfg.time_step,
            history: series,
            normalizer: *input.normalizer(),
            predictions,
            report_from: None,
        })
    }
}
