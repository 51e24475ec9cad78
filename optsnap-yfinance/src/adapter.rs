#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;

use optsnap_core::SnapError;
use yf::core::HistoryService;
use yfinance_rs as yf;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfHistory: Send + Sync {
    /// Fetch full history for a symbol using a provider-specific request.
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, SnapError>;
}

/// Options abstraction for expirations and option chain.
#[async_trait]
pub trait YfOptions: Send + Sync {
    /// Fetch available option expiration dates.
    async fn expirations(&self, symbol: &str) -> Result<Vec<i64>, SnapError>;
    /// Fetch the option chain for an optional expiration.
    async fn chain(
        &self,
        symbol: &str,
        date: Option<i64>,
    ) -> Result<yf::ticker::OptionChain, SnapError>;
}

/// Real adapter backed by a single `YfClient` instance.
/// `YfClient` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a `YfClient` with a cookie-enabled HTTP client and a browser user agent.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client or the `YfClient` cannot be built.
    pub fn try_new_default() -> Result<Self, SnapError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .map_err(|e| SnapError::connector("optsnap-yfinance", e.to_string()))?;
        Self::try_with_http(http)
    }

    /// Build a `YfClient` on top of a caller-provided `reqwest::Client`.
    ///
    /// The client should enable a cookie store for the yfinance auth/crumb flow.
    ///
    /// # Errors
    /// Returns `Connector` if the `YfClient` cannot be built.
    pub fn try_with_http(http: reqwest::Client) -> Result<Self, SnapError> {
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SnapError::connector("optsnap-yfinance", e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

fn map_yf_err(e: &yf::YfError, context: &str) -> SnapError {
    match e {
        yf::YfError::NotFound { .. } => SnapError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => {
            SnapError::connector("optsnap-yfinance", format!("rate limit: {context}"))
        }
        yf::YfError::ServerError { status, .. } => SnapError::connector(
            "optsnap-yfinance",
            format!("server error {status}: {context}"),
        ),
        yf::YfError::Status { status, .. } => {
            SnapError::connector("optsnap-yfinance", format!("status {status}: {context}"))
        }
        other => SnapError::connector("optsnap-yfinance", other.to_string()),
    }
}

#[async_trait]
impl YfHistory for RealAdapter {
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, SnapError> {
        // `YfClient` implements `HistoryService`, which we use directly.
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| map_yf_err(&e, &format!("history for {symbol}")))
    }
}

#[async_trait]
impl YfOptions for RealAdapter {
    async fn expirations(&self, symbol: &str) -> Result<Vec<i64>, SnapError> {
        let t = yf::ticker::Ticker::new(&self.client, symbol.to_string());
        t.options()
            .await
            .map_err(|e| map_yf_err(&e, &format!("options expirations for {symbol}")))
    }

    async fn chain(
        &self,
        symbol: &str,
        date: Option<i64>,
    ) -> Result<yf::ticker::OptionChain, SnapError> {
        let t = yf::ticker::Ticker::new(&self.client, symbol.to_string());
        t.option_chain(date)
            .await
            .map_err(|e| map_yf_err(&e, &format!("option chain for {symbol}")))
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn YfHistory {
    /// Build a `YfHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(
                String,
                yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, SnapError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> YfHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    yf::core::services::HistoryRequest,
                ) -> Result<yf::HistoryResponse, SnapError>,
        {
            async fn fetch_full(
                &self,
                symbol: &str,
                req: yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, SnapError> {
                (self.0)(symbol.to_string(), req)
            }
        }
        Arc::new(FnHist(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfOptions {
    /// Build a `YfOptions` from closures (tests only).
    pub fn from_fns<FE, FC>(fe: FE, fc: FC) -> Arc<dyn YfOptions>
    where
        FE: Send + Sync + 'static + Fn(String) -> Result<Vec<i64>, SnapError>,
        FC: Send
            + Sync
            + 'static
            + Fn(String, Option<i64>) -> Result<yf::ticker::OptionChain, SnapError>,
    {
        struct FnOptions<FE, FC> {
            fe: FE,
            fc: FC,
        }
        #[async_trait]
        impl<FE, FC> YfOptions for FnOptions<FE, FC>
        where
            FE: Send + Sync + 'static + Fn(String) -> Result<Vec<i64>, SnapError>,
            FC: Send
                + Sync
                + 'static
                + Fn(String, Option<i64>) -> Result<yf::ticker::OptionChain, SnapError>,
        {
            async fn expirations(&self, symbol: &str) -> Result<Vec<i64>, SnapError> {
                (self.fe)(symbol.to_string())
            }
            async fn chain(
                &self,
                symbol: &str,
                date: Option<i64>,
            ) -> Result<yf::ticker::OptionChain, SnapError> {
                (self.fc)(symbol.to_string(), date)
            }
        }
        Arc::new(FnOptions { fe, fc })
    }
}

/// Helper trait to split a concrete adapter into arc trait objects.
///
/// Unimplemented accessors fall back to adapters that answer `unsupported`.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn YfHistory>`.
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        <dyn YfHistory>::from_fn(|_, _| Err(SnapError::unsupported("history")))
    }
    /// Clone as `Arc<dyn YfOptions>`.
    fn clone_arc_options(&self) -> Arc<dyn YfOptions> {
        <dyn YfOptions>::from_fns(
            |_symbol| Err(SnapError::unsupported("options/expirations")),
            |_symbol, _date| Err(SnapError::unsupported("options/chain")),
        )
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_history(&self) -> Arc<dyn YfHistory> {
        Arc::new(self.clone()) as Arc<dyn YfHistory>
    }
    fn clone_arc_options(&self) -> Arc<dyn YfOptions> {
        Arc::new(self.clone()) as Arc<dyn YfOptions>
    }
}
