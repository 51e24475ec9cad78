//! Re-export of foundational types from `paft` and `optsnap-types`.
// Consolidated re-exports so downstream crates can depend on `optsnap-core` only

pub use optsnap_types::{
    Capability, DEFAULT_TICKERS, SnapConfig, SnapError, SnapReport, TickerOutcome,
};

pub use paft::domain::{AssetKind, Instrument, Symbol};

pub use paft::money::{Currency, IsoCurrency, Money};

pub use paft::Decimal;

pub use paft::market::options::{OptionChain, OptionContract};
pub use paft::market::requests::history::{HistoryRequest, Interval, Range};
pub use paft::market::responses::history::{Candle, HistoryMeta, HistoryResponse};
