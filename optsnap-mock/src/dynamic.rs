use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use optsnap_core::connector::{
    HistoryProvider, OptionChainProvider, OptionsExpirationsProvider, SnapConnector,
};
use optsnap_core::{
    AssetKind, HistoryRequest, HistoryResponse, Instrument, Interval, OptionChain, SnapError,
    Symbol,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(SnapError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn resolve(self) -> Result<T, SnapError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<Symbol, MockBehavior<HistoryResponse>>,
    expiration_rules: HashMap<Symbol, MockBehavior<Vec<i64>>>,
    chain_rules: HashMap<Symbol, MockBehavior<OptionChain>>,
    chain_requests: Vec<(Symbol, Option<i64>)>,
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
        behavior: MockBehavior<HistoryResponse>,
    ) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(symbol, behavior);
    }

    /// Set the behavior for `options_expirations` calls for a specific symbol.
    pub async fn set_expirations_behavior(&self, symbol: Symbol, behavior: MockBehavior<Vec<i64>>) {
        let mut guard = self.state.lock().await;
        guard.expiration_rules.insert(symbol, behavior);
    }

    /// Set the behavior for `option_chain` calls for a specific symbol.
    pub async fn set_chain_behavior(&self, symbol: Symbol, behavior: MockBehavior<OptionChain>) {
        let mut guard = self.state.lock().await;
        guard.chain_rules.insert(symbol, behavior);
    }

    /// Return the `(symbol, expiration)` pairs passed to `option_chain`, in call order.
    pub async fn chain_requests(&self) -> Vec<(Symbol, Option<i64>)> {
        let guard = self.state.lock().await;
        guard.chain_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.expiration_rules.clear();
        guard.chain_rules.clear();
        guard.chain_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Calls for a symbol without a configured behavior answer `Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SnapConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn SnapConnector>, controller)
    }
}

#[async_trait]
impl SnapConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn supports_kind(&self, _kind: AssetKind) -> bool {
        true
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_options_expirations_provider(&self) -> Option<&dyn OptionsExpirationsProvider> {
        Some(self as &dyn OptionsExpirationsProvider)
    }

    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        Some(self as &dyn OptionChainProvider)
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn history(
        &self,
        instrument: &Instrument,
        _req: HistoryRequest,
    ) -> Result<HistoryResponse, SnapError> {
        // Snapshot the behavior without holding the lock across await points.
        let behavior = {
            let guard = self.state.lock().await;
            guard.history_rules.get(instrument.symbol()).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(SnapError::unsupported("history")),
        }
    }

    fn supported_history_intervals(&self, _kind: AssetKind) -> &'static [Interval] {
        const ONLY_D1: &[Interval] = &[Interval::D1];
        ONLY_D1
    }
}

#[async_trait]
impl OptionsExpirationsProvider for DynamicMockConnector {
    async fn options_expirations(&self, instrument: &Instrument) -> Result<Vec<i64>, SnapError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.expiration_rules.get(instrument.symbol()).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(SnapError::unsupported("options/expirations")),
        }
    }
}

#[async_trait]
impl OptionChainProvider for DynamicMockConnector {
    async fn option_chain(
        &self,
        instrument: &Instrument,
        date: Option<i64>,
    ) -> Result<OptionChain, SnapError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .chain_requests
                .push((instrument.symbol().clone(), date));
            guard.chain_rules.get(instrument.symbol()).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(SnapError::unsupported("options/chain")),
        }
    }
}
