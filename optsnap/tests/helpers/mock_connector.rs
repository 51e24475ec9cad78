#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use optsnap_core::{
    AssetKind, Candle, HistoryRequest, HistoryResponse, Instrument, Interval, OptionChain,
    SnapConnector, SnapError,
    connector::{HistoryProvider, OptionChainProvider, OptionsExpirationsProvider},
};
use tokio::time::{Duration, sleep};

const DEFAULT_HISTORY_INTERVALS: &[Interval] = &[Interval::D1];

/// Simple in-memory connector used by integration tests.
///
/// Each capability is exposed only when a closure for it was configured.
pub struct MockConnector {
    pub name: &'static str,
    pub kind_ok: Option<AssetKind>,
    pub delay_ms: u64,
    pub calls: AtomicUsize,
    pub history_intervals: &'static [Interval],

    pub history_fn: Option<
        Arc<
            dyn Fn(&Instrument, HistoryRequest) -> Result<HistoryResponse, SnapError>
                + Send
                + Sync,
        >,
    >,
    pub options_expirations_fn:
        Option<Arc<dyn Fn(&Instrument) -> Result<Vec<i64>, SnapError> + Send + Sync>>,
    pub option_chain_fn: Option<
        Arc<dyn Fn(&Instrument, Option<i64>) -> Result<OptionChain, SnapError> + Send + Sync>,
    >,
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    /// Number of provider calls served so far, across all capabilities.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(
        &self,
        i: &Instrument,
        r: HistoryRequest,
    ) -> Result<HistoryResponse, SnapError> {
        self.enter().await;
        if let Some(f) = &self.history_fn {
            return (f)(i, r);
        }
        Err(SnapError::unsupported("history"))
    }

    fn supported_history_intervals(&self, _k: AssetKind) -> &'static [Interval] {
        self.history_intervals
    }
}

#[async_trait]
impl OptionsExpirationsProvider for MockConnector {
    async fn options_expirations(&self, i: &Instrument) -> Result<Vec<i64>, SnapError> {
        self.enter().await;
        if let Some(f) = &self.options_expirations_fn {
            return (f)(i);
        }
        Err(SnapError::unsupported("options/expirations"))
    }
}

#[async_trait]
impl OptionChainProvider for MockConnector {
    async fn option_chain(
        &self,
        i: &Instrument,
        date: Option<i64>,
    ) -> Result<OptionChain, SnapError> {
        self.enter().await;
        if let Some(f) = &self.option_chain_fn {
            return (f)(i, date);
        }
        Err(SnapError::unsupported("options/chain"))
    }
}

#[async_trait]
impl SnapConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_kind(&self, kind: AssetKind) -> bool {
        self.kind_ok.as_ref().is_none_or(|k| k == &kind)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        if self.history_fn.is_some() {
            Some(self as &dyn HistoryProvider)
        } else {
            None
        }
    }

    fn as_options_expirations_provider(&self) -> Option<&dyn OptionsExpirationsProvider> {
        if self.options_expirations_fn.is_some() {
            Some(self as &dyn OptionsExpirationsProvider)
        } else {
            None
        }
    }

    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        if self.option_chain_fn.is_some() {
            Some(self as &dyn OptionChainProvider)
        } else {
            None
        }
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    kind_ok: Option<AssetKind>,
    delay_ms: u64,
    history_intervals: &'static [Interval],
    history_fn: Option<
        Arc<
            dyn Fn(&Instrument, HistoryRequest) -> Result<HistoryResponse, SnapError>
                + Send
                + Sync,
        >,
    >,
    options_expirations_fn:
        Option<Arc<dyn Fn(&Instrument) -> Result<Vec<i64>, SnapError> + Send + Sync>>,
    option_chain_fn: Option<
        Arc<dyn Fn(&Instrument, Option<i64>) -> Result<OptionChain, SnapError> + Send + Sync>,
    >,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "default_mock",
            kind_ok: None,
            delay_ms: 0,
            history_intervals: DEFAULT_HISTORY_INTERVALS,
            history_fn: None,
            options_expirations_fn: None,
            option_chain_fn: None,
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn supports_kind(mut self, kind: AssetKind) -> Self {
        self.kind_ok = Some(kind);
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self
    }

    // History
    pub fn with_history_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instrument, HistoryRequest) -> Result<HistoryResponse, SnapError>
            + Send
            + Sync
            + 'static,
    {
        self.history_fn = Some(Arc::new(f));
        self
    }
    pub fn with_history_intervals(mut self, intervals: &'static [Interval]) -> Self {
        self.history_intervals = intervals;
        self
    }
    pub fn returns_history_ok(mut self, resp: HistoryResponse) -> Self {
        self.history_fn = Some(Arc::new(move |_i, _r| Ok(resp.clone())));
        self
    }

    // Options
    pub fn with_options_expirations_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instrument) -> Result<Vec<i64>, SnapError> + Send + Sync + 'static,
    {
        self.options_expirations_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_options_expirations_ok(mut self, dates: Vec<i64>) -> Self {
        self.options_expirations_fn = Some(Arc::new(move |_i| Ok(dates.clone())));
        self
    }
    pub fn with_option_chain_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instrument, Option<i64>) -> Result<OptionChain, SnapError> + Send + Sync + 'static,
    {
        self.option_chain_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_option_chain_ok(mut self, chain: OptionChain) -> Self {
        self.option_chain_fn = Some(Arc::new(move |_i, _d| Ok(chain.clone())));
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            kind_ok: self.kind_ok,
            delay_ms: self.delay_ms,
            calls: AtomicUsize::new(0),
            history_intervals: self.history_intervals,
            history_fn: self.history_fn,
            options_expirations_fn: self.options_expirations_fn,
            option_chain_fn: self.option_chain_fn,
        })
    }
}

/// Create a candle with all OHLC equal to `close` (handy in tests).
pub fn candle(ts: i64, close: &str) -> Candle {
    let price = crate::helpers::usd(close);
    Candle {
        ts: chrono::DateTime::from_timestamp(ts, 0).unwrap(),
        open: price.clone(),
        high: price.clone(),
        low: price.clone(),
        close: price,
        close_unadj: None,
        volume: None,
    }
}

/// History response holding one candle per `(ts, close)` pair.
pub fn history_of(points: &[(i64, &str)]) -> HistoryResponse {
    HistoryResponse {
        candles: points.iter().map(|(ts, c)| candle(*ts, c)).collect(),
        actions: vec![],
        adjusted: false,
        meta: None,
    }
}
