use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use paft::Decimal;
use paft::market::options::{OptionChain, OptionContract};

/// Format of the capture timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column names of a snapshot file, in record order.
pub const HEADER: [&str; 15] = [
    "Timestamp",
    "Underlying Price",
    "strike",
    "Call_lastPrice",
    "Call_bid",
    "Call_ask",
    "Call_volume",
    "Call_impliedVolatility",
    "Call_openInterest",
    "Put_lastPrice",
    "Put_bid",
    "Put_ask",
    "Put_volume",
    "Put_impliedVolatility",
    "Put_openInterest",
];

/// Per-leg quote fields kept in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LegQuote {
    /// Last traded premium.
    pub last_price: Option<Decimal>,
    /// Best bid.
    pub bid: Option<Decimal>,
    /// Best ask.
    pub ask: Option<Decimal>,
    /// Contracts traded today.
    pub volume: Option<u64>,
    /// Implied volatility as a fraction (0.35 = 35%).
    pub implied_volatility: Option<f64>,
    /// Open contracts.
    pub open_interest: Option<u64>,
}

impl LegQuote {
    fn from_contract(c: &OptionContract) -> Self {
        Self {
            last_price: c.price.as_ref().map(paft::money::Money::amount),
            bid: c.bid.as_ref().map(paft::money::Money::amount),
            ask: c.ask.as_ref().map(paft::money::Money::amount),
            volume: c.volume,
            implied_volatility: c.implied_volatility,
            open_interest: c.open_interest,
        }
    }

    fn push_fields(&self, out: &mut Vec<String>) {
        out.push(fmt_decimal(self.last_price));
        out.push(fmt_decimal(self.bid));
        out.push(fmt_decimal(self.ask));
        out.push(fmt_opt(self.volume));
        out.push(fmt_opt(self.implied_volatility));
        out.push(fmt_opt(self.open_interest));
    }
}

/// One call and one put sharing a strike, stamped with capture time and underlying price.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRow {
    /// Local wall-clock time the snapshot was taken, second resolution.
    pub captured_at: NaiveDateTime,
    /// Underlying price the strike window was centred on.
    pub underlying: Decimal,
    /// Strike shared by both legs.
    pub strike: Decimal,
    /// Call leg.
    pub call: LegQuote,
    /// Put leg.
    pub put: LegQuote,
}

impl CombinedRow {
    /// Capture timestamp rendered with [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.captured_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// CSV fields in [`HEADER`] order. Missing values are empty strings.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(HEADER.len());
        out.push(self.timestamp());
        out.push(self.underlying.normalize().to_string());
        out.push(self.strike.normalize().to_string());
        self.call.push_fields(&mut out);
        self.put.push_fields(&mut out);
        out
    }
}

fn fmt_decimal(v: Option<Decimal>) -> String {
    v.map(|d| d.normalize().to_string()).unwrap_or_default()
}

fn fmt_opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn legs_in_window<'a>(
    legs: &'a [OptionContract],
    window: &HashSet<Decimal>,
) -> BTreeMap<Decimal, &'a OptionContract> {
    let mut by_strike = BTreeMap::new();
    for c in legs {
        let strike = c.strike.amount().normalize();
        if window.contains(&strike) {
            // Duplicate strikes on one side: the first listed contract wins.
            by_strike.entry(strike).or_insert(c);
        }
    }
    by_strike
}

/// Keep the legs whose strike is in `strikes` and inner-join calls with puts on strike.
///
/// Strikes missing from either side produce no row. Rows come back ordered by
/// ascending strike, each stamped with `captured_at` and `underlying`.
#[must_use]
pub fn select_and_merge(
    chain: &OptionChain,
    underlying: Decimal,
    strikes: &[Decimal],
    captured_at: NaiveDateTime,
) -> Vec<CombinedRow> {
    let window: HashSet<Decimal> = strikes.iter().map(|s| s.normalize()).collect();
    let calls = legs_in_window(&chain.calls, &window);
    let puts = legs_in_window(&chain.puts, &window);

    calls
        .into_iter()
        .filter_map(|(strike, call)| {
            puts.get(&strike).map(|put| CombinedRow {
                captured_at,
                underlying,
                strike,
                call: LegQuote::from_contract(call),
                put: LegQuote::from_contract(put),
            })
        })
        .collect()
}
