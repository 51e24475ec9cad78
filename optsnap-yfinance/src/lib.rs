//! optsnap-yfinance
//!
//! Public connector that implements `SnapConnector` on top of the `yfinance-rs`
//! client library. Exposes daily history (for the latest close), option
//! expirations and option chains.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{RealAdapter, YfHistory, YfOptions};
use async_trait::async_trait;
use optsnap_core::{
    AssetKind, HistoryRequest, HistoryResponse, Instrument, Interval, OptionChain, SnapError,
    connector::{HistoryProvider, OptionChainProvider, OptionsExpirationsProvider, SnapConnector},
};

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YfHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type OptionsAdapter = Arc<dyn YfOptions>;
#[cfg(not(feature = "test-adapters"))]
type OptionsAdapter = AdapterArc;

/// Public connector type. Production users construct it with `YfConnector::try_new_default()`.
pub struct YfConnector {
    history: HistoryAdapter,
    options: OptionsAdapter,
}

impl YfConnector {
    /// Stable connector name used in error tags and logs.
    pub const NAME: &'static str = "optsnap-yfinance";

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("no matches")
    }

    fn normalize_error(e: SnapError, what: &str) -> SnapError {
        match e {
            SnapError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    SnapError::not_found(what.to_string())
                } else {
                    SnapError::connector(Self::NAME, msg)
                }
            }
            SnapError::Other(msg) => SnapError::connector(Self::NAME, msg),
            other => other,
        }
    }

    /// Build with a fresh `yfinance_rs::YfClient` inside.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or the `YfClient` cannot be constructed.
    pub fn try_new_default() -> Result<Self, SnapError> {
        let a = RealAdapter::try_new_default()?;
        Ok(Self::from_adapter(&a))
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yfinance_rs::YfClient) -> Self {
        let a = RealAdapter::new(client);
        Self::from_adapter(&a)
    }

    /// Build from a provided `reqwest::Client` by constructing a `yfinance_rs::YfClient`.
    ///
    /// Note: The provided client should enable a cookie store for yfinance auth/crumb flow.
    ///
    /// # Errors
    /// Returns an error if the internal `YfClient` cannot be constructed from the provided
    /// HTTP client.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, SnapError> {
        let a = RealAdapter::try_with_http(http)?;
        Ok(Self::from_adapter(&a))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            history: adapter.clone_arc_history(),
            options: adapter.clone_arc_options(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            history: Arc::clone(&shared),
            options: shared,
        }
    }
}

#[async_trait]
impl HistoryProvider for YfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "optsnap::yfinance",
            skip(self, req),
            fields(symbol = %instrument.symbol()),
        )
    )]
    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, SnapError> {
        let yf_req = yfinance_rs::core::services::HistoryRequest {
            range: req.range(),
            period: req.period().map(|(s, e)| (s.timestamp(), e.timestamp())),
            interval: req.interval(),
            include_prepost: req.include_prepost(),
            include_actions: req.include_actions(),
            auto_adjust: req.auto_adjust(),
            keepna: req.keepna(),
        };
        let symbol = instrument.symbol_str();
        self.history
            .fetch_full(symbol, yf_req)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("history for {symbol}")))
    }

    fn supported_history_intervals(&self, _kind: AssetKind) -> &'static [Interval] {
        use Interval as I;
        const YF_INTERVALS: &[I] = &[
            I::I1m,
            I::I2m,
            I::I5m,
            I::I15m,
            I::I30m,
            I::I1h,
            I::I90m,
            I::D1,
            I::D5,
            I::W1,
            I::M1,
            I::M3,
        ];
        YF_INTERVALS
    }
}

#[async_trait]
impl OptionsExpirationsProvider for YfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "optsnap::yfinance",
            skip(self),
            fields(symbol = %instrument.symbol()),
        )
    )]
    async fn options_expirations(&self, instrument: &Instrument) -> Result<Vec<i64>, SnapError> {
        let symbol = instrument.symbol_str();
        self.options
            .expirations(symbol)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("options expirations for {symbol}")))
    }
}

#[async_trait]
impl OptionChainProvider for YfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "optsnap::yfinance",
            skip(self),
            fields(symbol = %instrument.symbol()),
        )
    )]
    async fn option_chain(
        &self,
        instrument: &Instrument,
        date: Option<i64>,
    ) -> Result<OptionChain, SnapError> {
        let symbol = instrument.symbol_str();
        self.options
            .chain(symbol, date)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("option chain for {symbol}")))
    }
}

#[async_trait]
impl SnapConnector for YfConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
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

    /// Option chains are listed for equity, fund and index instruments.
    fn supports_kind(&self, kind: AssetKind) -> bool {
        matches!(kind, AssetKind::Equity | AssetKind::Fund | AssetKind::Index)
    }
}
