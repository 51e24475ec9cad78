use core::fmt;
use serde::{Deserialize, Serialize};

/// Capability labels used in errors, timeouts and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Historical OHLCV candles, used to derive the latest price.
    History,
    /// Options: expirations list.
    OptionsExpirations,
    /// Options: option chain for an expiration date.
    OptionChain,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::OptionsExpirations => "options-expirations",
            Self::OptionChain => "option-chain",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
