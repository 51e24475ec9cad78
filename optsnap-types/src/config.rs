//! Configuration shared by the snapshotter and its builder.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tickers captured when no explicit list is configured, in processing order.
pub const DEFAULT_TICKERS: [&str; 5] = ["SPY", "NVDA", "TSLA", "AAPL", "MSFT"];

/// Global configuration for a snapshot run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Symbols processed by `run()`, strictly in this order.
    pub tickers: Vec<String>,
    /// Directory the per-expiration CSV files are appended in.
    pub output_dir: PathBuf,
    /// Spacing between adjacent strikes in the window, in price units.
    pub strike_step: u32,
    /// Number of strikes kept on each side of the centre strike.
    pub strikes_each_side: u32,
    /// Optional bound on each provider call. `None` leaves the provider client's
    /// own defaults in charge.
    pub provider_timeout: Option<Duration>,
}

impl SnapConfig {
    /// Total number of strikes in the selection window.
    #[must_use]
    pub const fn window_len(&self) -> u32 {
        self.strikes_each_side * 2 + 1
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(ToString::to_string).collect(),
            output_dir: PathBuf::from("."),
            strike_step: 5,
            strikes_each_side: 4,
            provider_timeout: None,
        }
    }
}
