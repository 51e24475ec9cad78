//! optsnap-core
//!
//! Core types, traits, and utilities shared across the optsnap crates.
//!
//! - `types`: re-exported domain types (instruments, money, option chains, history).
//! - `connector`: the `SnapConnector` trait and capability provider traits.
//! - `chain`: strike-window selection and call/put merging for snapshots.
#![warn(missing_docs)]

/// Strike window selection and call/put merging.
pub mod chain;
/// Connector capability traits and the primary `SnapConnector` interface.
pub mod connector;
pub mod types;

pub use chain::expiry::expiration_label;
pub use chain::merge::{CombinedRow, HEADER, LegQuote, TIMESTAMP_FORMAT, select_and_merge};
pub use chain::window::{latest_close, round_quote, strike_window};
pub use connector::SnapConnector;
pub use types::*;
