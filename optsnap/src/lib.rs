//! optsnap appends near-the-money option chain snapshots to CSV files.
//!
//! Overview
//! - For each configured ticker, reads the latest daily close from a connector that
//!   implements the `optsnap_core` contracts and rounds it to two decimals.
//! - Lists option expirations, takes the soonest one, and fetches its chain.
//! - Keeps nine strikes spaced 5 apart around the price rounded to the nearest
//!   multiple of 5, and joins calls with puts on strike.
//! - Appends the joined rows, stamped with local capture time and the price, to
//!   `{TICKER}_options_{YYYY-MM-DD}.csv`. The header is written only when the file is new.
//!
//! Key behaviors and trade-offs
//! - Tickers run strictly one after another. A failure in any step ends that ticker
//!   only; it is reported as [`TickerOutcome::Failed`] and the run moves on.
//! - Nothing is retried. An optional per-call timeout bounds stalled providers.
//! - Files are append-only and never deduplicated; concurrent runs against the same
//!   directory are not coordinated.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use optsnap::Snapshotter;
//! use optsnap_yfinance::YfConnector;
//!
//! let snap = Snapshotter::builder()
//!     .with_connector(Arc::new(YfConnector::try_new_default()?))
//!     .build()?;
//! for outcome in &snap.run().await.outcomes {
//!     println!("{outcome}");
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
pub mod sink;
mod snapshot;

pub use core::{Snapshotter, SnapshotterBuilder};
pub use snapshot::NearestChain;

pub use optsnap_core::{
    AssetKind, Capability, CombinedRow, DEFAULT_TICKERS, Decimal, HEADER, Instrument,
    OptionChain, OptionContract, SnapConfig, SnapConnector, SnapError, SnapReport,
    TickerOutcome,
};
