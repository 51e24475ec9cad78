//! Optsnap-specific error, configuration and report types built on top of `paft`.
#![warn(missing_docs)]

mod capability;
mod config;
/// Unified error type.
pub mod error;
mod reports;

pub use capability::Capability;
pub use config::{DEFAULT_TICKERS, SnapConfig};
pub use error::SnapError;
pub use reports::{SnapReport, TickerOutcome};
