use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sibyl_core::{DateRange, PriceSeries, PriceSource, SibylError, Symbol};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(SibylError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<Symbol, MockBehavior<PriceSeries>>,
    history_requests: Vec<(Symbol, DateRange)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `history` calls for a specific symbol.
    pub async fn set_history_behavior(
        &self,
        symbol: Symbol,
        behavior: MockBehavior<PriceSeries>,
    ) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(symbol, behavior);
    }

    /// Return a copy of every `history` request received so far.
    pub async fn history_requests(&self) -> Vec<(Symbol, DateRange)> {
        let guard = self.state.lock().await;
        guard.history_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.history_requests.clear();
    }
}

/// A price source that defers all behavior to an external controller.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn PriceSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PriceSource>, controller)
    }
}

#[async_trait]
impl PriceSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn history(&self, symbol: &Symbol, range: DateRange) -> Result<PriceSeries, SibylError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.history_requests.push((symbol.clone(), range));
            guard.history_rules.get(symbol).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(SibylError::not_found(format!("history for {symbol}"))),
        }
    }
}
