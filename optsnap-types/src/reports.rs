//! Report envelopes produced by the snapshotter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SnapError;

/// Result of processing a single ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickerOutcome {
    /// Rows were appended to `file`.
    Saved {
        /// Ticker symbol.
        symbol: String,
        /// File name (without directory) the rows were appended to.
        file: String,
        /// Number of combined rows written in this run.
        ///
        /// Zero when no strike in the window is listed on both sides. The file is
        /// still created (header only when new) and the ticker still counts as saved.
        rows: usize,
        /// Capture timestamp stamped on every row, `YYYY-MM-DD HH:MM:SS`.
        captured_at: String,
    },
    /// Processing stopped at the first failing step.
    Failed {
        /// Ticker symbol.
        symbol: String,
        /// The error that ended processing for this ticker.
        error: SnapError,
    },
}

impl TickerOutcome {
    /// Symbol this outcome belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Saved { symbol, .. } | Self::Failed { symbol, .. } => symbol,
        }
    }

    /// True when rows were persisted.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

impl fmt::Display for TickerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved {
                symbol,
                file,
                captured_at,
                ..
            } => write!(f, "[{symbol}] Saved {file} at {captured_at}"),
            Self::Failed { symbol, error } => write!(f, "[{symbol}] Error: {error}"),
        }
    }
}

/// Summary of one pass over the configured tickers.
///
/// Holds one outcome per attempted ticker, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SnapReport {
    /// Per-ticker outcomes.
    pub outcomes: Vec<TickerOutcome>,
}

impl SnapReport {
    /// Outcomes that ended in an error.
    pub fn failures(&self) -> impl Iterator<Item = &TickerOutcome> {
        self.outcomes.iter().filter(|o| !o.is_saved())
    }

    /// Total rows appended across all tickers.
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                TickerOutcome::Saved { rows, .. } => *rows,
                TickerOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}
