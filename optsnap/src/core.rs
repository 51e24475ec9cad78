use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use optsnap_core::{AssetKind, Capability, Instrument, SnapConfig, SnapConnector, SnapError};

/// Orchestrator that snapshots near-the-money option chains for a list of tickers.
pub struct Snapshotter {
    pub(crate) connectors: Vec<Arc<dyn SnapConnector>>,
    pub(crate) cfg: SnapConfig,
}

/// Builder for constructing a `Snapshotter` with custom configuration.
pub struct SnapshotterBuilder {
    connectors: Vec<Arc<dyn SnapConnector>>,
    cfg: SnapConfig,
}

impl Default for SnapshotterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotterBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; you must register at least one via [`with_connector`].
    /// - Defaults capture `SPY, NVDA, TSLA, AAPL, MSFT` into the working directory with a
    ///   nine-strike window spaced 5 apart and no extra provider timeout.
    ///
    /// [`with_connector`]: SnapshotterBuilder::with_connector
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: SnapConfig::default(),
        }
    }

    /// Start from an existing configuration (for example one deserialized from disk).
    #[must_use]
    pub fn config(mut self, cfg: SnapConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Register a provider connector.
    ///
    /// Behavior and trade-offs:
    /// - Each capability (history, expirations, chain) is served by the first registered
    ///   connector that exposes it and supports the instrument kind.
    /// - A failing connector is not retried and no other connector is tried in its place.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn SnapConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the ticker list. Tickers are processed strictly in the given order.
    ///
    /// An empty list is allowed; `run()` then does nothing.
    #[must_use]
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Directory the CSV files are appended in. It must already exist.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cfg.output_dir = dir.into();
        self
    }

    /// Spacing between adjacent strikes in the selection window.
    #[must_use]
    pub const fn strike_step(mut self, step: u32) -> Self {
        self.cfg.strike_step = step;
        self
    }

    /// Number of strikes kept on each side of the centre strike.
    #[must_use]
    pub const fn strikes_each_side(mut self, n: u32) -> Self {
        self.cfg.strikes_each_side = n;
        self
    }

    /// Bound every provider call by `timeout`.
    ///
    /// Behavior and trade-offs:
    /// - A call that exceeds the bound fails the ticker with `ProviderTimeout`; the run
    ///   continues with the next ticker.
    /// - Without a bound, a stalled provider stalls the whole run.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = Some(timeout);
        self
    }

    /// Build the `Snapshotter`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`with_connector`]
    /// or the strike step is zero.
    ///
    /// [`with_connector`]: SnapshotterBuilder::with_connector
    pub fn build(self) -> Result<Snapshotter, SnapError> {
        if self.connectors.is_empty() {
            return Err(SnapError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.strike_step == 0 {
            return Err(SnapError::InvalidArg(
                "strike step must be positive".to_string(),
            ));
        }
        Ok(Snapshotter {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

impl Snapshotter {
    /// Start building a new `Snapshotter`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use optsnap::Snapshotter;
    /// use optsnap_yfinance::YfConnector;
    ///
    /// let snap = Snapshotter::builder()
    ///     .with_connector(Arc::new(YfConnector::try_new_default()?))
    ///     .tickers(["SPY", "QQQ"])
    ///     .output_dir("/var/lib/optsnap")
    ///     .build()?;
    /// let report = snap.run().await;
    /// ```
    #[must_use]
    pub fn builder() -> SnapshotterBuilder {
        SnapshotterBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &SnapConfig {
        &self.cfg
    }

    /// First registered connector that exposes `has_capability` and supports the instrument kind.
    pub(crate) fn connector_for(
        &self,
        inst: &Instrument,
        capability: Capability,
        has_capability: impl Fn(&dyn SnapConnector) -> bool,
    ) -> Result<Arc<dyn SnapConnector>, SnapError> {
        let kind: AssetKind = *inst.kind();
        self.connectors
            .iter()
            .find(|c| c.supports_kind(kind) && has_capability(c.as_ref()))
            .cloned()
            .ok_or_else(|| SnapError::unsupported(capability.as_str()))
    }

    /// Await a provider future, bounded by the configured timeout when one is set.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "optsnap::core::provider_call",
            skip(self, fut),
            fields(connector = connector_name, capability = %capability),
        )
    )]
    pub(crate) async fn provider_call<T, Fut>(
        &self,
        connector_name: &'static str,
        capability: Capability,
        fut: Fut,
    ) -> Result<T, SnapError>
    where
        Fut: core::future::Future<Output = Result<T, SnapError>>,
    {
        match self.cfg.provider_timeout {
            Some(timeout) => (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
                Err(SnapError::provider_timeout(
                    connector_name,
                    capability.as_str(),
                ))
            }),
            None => fut.await,
        }
    }
}
