//! Deterministic connectors for tests and offline runs.
//!
//! [`MockConnector`] serves static fixtures for the default tickers plus a few
//! special symbols:
//! - `FAIL`: every call fails with a connector error.
//! - `TIMEOUT`: every call sleeps briefly before answering.
//! - `NOHIST`: history returns no candles.
//! - `NOOPT`: no option expirations are listed.
//! - `EMPTYCHAIN`: the nearest chain lists no contracts.
//!
//! [`DynamicMockConnector`] defers every answer to a test-side controller.
use async_trait::async_trait;
use optsnap_core::connector::{
    HistoryProvider, OptionChainProvider, OptionsExpirationsProvider, SnapConnector,
};
use optsnap_core::{
    AssetKind, HistoryRequest, HistoryResponse, Instrument, Interval, OptionChain, SnapError,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::options::{NEAREST_EXPIRATION, NEXT_EXPIRATION};

/// Mock connector for CI-safe runs. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Stable connector name used in error tags.
    pub const NAME: &'static str = "optsnap-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> SnapError {
        SnapError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(
        symbol: &str,
        capability: &'static str,
    ) -> Result<(), SnapError> {
        match symbol {
            "FAIL" => Err(SnapError::connector(
                Self::NAME,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Long enough to trip a short provider timeout, short enough for tests.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SnapConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn vendor(&self) -> &'static str {
        "Mock"
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
impl HistoryProvider for MockConnector {
    async fn history(
        &self,
        instrument: &Instrument,
        _req: HistoryRequest,
    ) -> Result<HistoryResponse, SnapError> {
        let s = instrument.symbol_str();
        Self::maybe_fail_or_timeout(s, "history").await?;
        fixtures::history::by_symbol(s).ok_or_else(|| Self::not_found(&format!("history for {s}")))
    }

    fn supported_history_intervals(&self, _kind: AssetKind) -> &'static [Interval] {
        const ONLY_D1: &[Interval] = &[Interval::D1];
        ONLY_D1
    }
}

#[async_trait]
impl OptionsExpirationsProvider for MockConnector {
    async fn options_expirations(&self, instrument: &Instrument) -> Result<Vec<i64>, SnapError> {
        let s = instrument.symbol_str();
        Self::maybe_fail_or_timeout(s, "options expirations").await?;
        fixtures::options::expirations_by_symbol(s)
            .ok_or_else(|| Self::not_found(&format!("options expirations for {s}")))
    }
}

#[async_trait]
impl OptionChainProvider for MockConnector {
    async fn option_chain(
        &self,
        instrument: &Instrument,
        date: Option<i64>,
    ) -> Result<OptionChain, SnapError> {
        let s = instrument.symbol_str();
        Self::maybe_fail_or_timeout(s, "option chain").await?;
        fixtures::options::chain_by_symbol_and_date(s, date)
            .ok_or_else(|| Self::not_found(&format!("option chain for {s}")))
    }
}
