use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the optsnap workspace.
///
/// This wraps capability mismatches, argument validation errors, provider-tagged
/// failures, empty-data conditions, and output failures raised while appending
/// snapshots to disk.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "options/chain").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "option chain for AAPL".
        what: String,
    },

    /// The provider answered successfully but returned no rows.
    #[error("No data found: {what}")]
    NoData {
        /// Description of the empty resource, e.g. "price history for AAPL".
        what: String,
    },

    /// The provider lists no option expirations for the symbol.
    #[error("no option expirations listed for {symbol}")]
    NoExpirations {
        /// Symbol whose expiration list was empty.
        symbol: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "history", "options/chain").
        capability: String,
    },

    /// Opening or writing an output file failed.
    #[error("i/o error on {path}: {msg}")]
    Io {
        /// Path of the file being written.
        path: String,
        /// Underlying error message.
        msg: String,
    },

    /// Encoding a CSV record failed.
    #[error("csv error on {path}: {msg}")]
    Csv {
        /// Path of the file being written.
        path: String,
        /// Underlying error message.
        msg: String,
    },
}

impl SnapError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }
    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `NoData` error for a description of the empty resource.
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build an `Io` error tagged with the output path.
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            msg: err.to_string(),
        }
    }

    /// Returns true if this error points at something an operator can act on.
    ///
    /// Capability absence and benign empty/not-found conditions (delisted symbol,
    /// market closed, no listed options) are not actionable; transport, output and
    /// timeout failures are.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(
            self,
            Self::Unsupported { .. }
                | Self::NotFound { .. }
                | Self::NoData { .. }
                | Self::NoExpirations { .. }
        )
    }
}

impl From<paft::Error> for SnapError {
    fn from(err: paft::Error) -> Self {
        use paft::Error as E;
        match err {
            // Money runtime issues indicate a data/operation problem at runtime
            E::Money(_) => Self::Data(err.to_string()),
            E::Core(_) | E::Domain(_) | E::Market(_) | E::MoneyParse(_) | E::Canonical(_) => {
                Self::InvalidArg(err.to_string())
            }
        }
    }
}

impl From<paft::market::MarketError> for SnapError {
    fn from(e: paft::market::MarketError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::domain::DomainError> for SnapError {
    fn from(e: paft::domain::DomainError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::money::MoneyError> for SnapError {
    fn from(e: paft::money::MoneyError) -> Self {
        Self::Data(e.to_string())
    }
}
