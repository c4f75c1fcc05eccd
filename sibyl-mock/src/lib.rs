use async_trait::async_trait;
use sibyl_core::{DateRange, PriceSeries, PriceSource, SibylError, Symbol};

mod dynamic;
mod fixtures;
mod predictors;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use predictors::{ConstantPredictor, FailingPredictor, LastValuePredictor, ShortPredictor};

/// Mock price source for CI-safe tests and examples. Serves deterministic
/// fixture histories.
///
/// Fixture symbols: `AAPL` (120 weekdays), `MSFT` (90), `FLAT` (70 identical
/// closes), `SHORT` (30), `EMPTY` (no data). `FAIL` returns a source error and
/// `TIMEOUT` answers only after a short delay.
pub struct MockSource;

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Full fixture history for `symbol`, ignoring any date range.
    #[must_use]
    pub fn fixture(symbol: &str) -> Option<PriceSeries> {
        fixtures::history::by_symbol(symbol)
    }

    async fn maybe_fail_or_delay(symbol: &str) -> Result<(), SibylError> {
        match symbol {
            "FAIL" => Err(SibylError::source_failed(
                "sibyl-mock",
                "forced failure: history",
            )),
            "TIMEOUT" => {
                // Long enough for a short orchestrator timeout to fire
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PriceSource for MockSource {
    fn name(&self) -> &'static str {
        "sibyl-mock"
    }

    async fn history(&self, symbol: &Symbol, range: DateRange) -> Result<PriceSeries, SibylError> {
        let s = symbol.as_str();
        Self::maybe_fail_or_delay(s).await?;
        let full = fixtures::history::by_symbol(s)
            .ok_or_else(|| SibylError::not_found(format!("history for {s}")))?;
        Ok(PriceSeries::from_unordered(
            full.into_points()
                .into_iter()
                .filter(|p| range.contains(p.ts)),
        ))
    }
}
