use async_trait::async_trait;

use crate::SnapError;
use paft::domain::{AssetKind, Instrument};
use paft::market::options::OptionChain;
use paft::market::requests::history::{HistoryRequest, Interval};
use paft::market::responses::history::HistoryResponse;

/// Focused role trait for connectors that provide OHLCV history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch OHLCV history for the given instrument and request.
    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, SnapError>;

    /// Exact intervals this connector can natively serve for history.
    fn supported_history_intervals(&self, kind: AssetKind) -> &'static [Interval];
}

/// Focused role trait for connectors that provide options expirations.
#[async_trait]
pub trait OptionsExpirationsProvider: Send + Sync {
    /// Fetch option expiration timestamps (UTC epoch seconds) for the given instrument.
    ///
    /// Order is the provider's; the first entry is treated as the nearest expiration.
    async fn options_expirations(&self, instrument: &Instrument) -> Result<Vec<i64>, SnapError>;
}

/// Focused role trait for connectors that provide option chains.
#[async_trait]
pub trait OptionChainProvider: Send + Sync {
    /// Fetch an option chain for the given instrument and optional expiration date.
    async fn option_chain(
        &self,
        instrument: &Instrument,
        date: Option<i64>,
    ) -> Result<OptionChain, SnapError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait SnapConnector: Send + Sync {
    /// A stable identifier used in logs and error tags (e.g., "optsnap-yfinance").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to support a given asset kind.
    ///
    /// Default: returns `false` for all kinds. Connectors must explicitly override
    /// this method to declare which asset kinds they support.
    fn supports_kind(&self, kind: AssetKind) -> bool {
        let _ = kind;
        false
    }

    /// Advertise history capability by returning a usable trait object reference when supported.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }

    /// If implemented, returns a trait object for options expirations.
    fn as_options_expirations_provider(&self) -> Option<&dyn OptionsExpirationsProvider> {
        None
    }

    /// If implemented, returns a trait object for option chains.
    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        None
    }
}
