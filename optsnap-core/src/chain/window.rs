use paft::Decimal;
use paft::market::responses::history::HistoryResponse;

use crate::SnapError;

/// Round a raw close to the two fractional digits stored in snapshots.
///
/// Midpoints round to even.
#[must_use]
pub fn round_quote(price: Decimal) -> Decimal {
    price.round_dp(2)
}

/// Close of the most recent candle in `history`, or `None` when it has no candles.
///
/// Candles are not assumed to be sorted; the one with the greatest timestamp wins.
#[must_use]
pub fn latest_close(history: &HistoryResponse) -> Option<Decimal> {
    history
        .candles
        .iter()
        .max_by_key(|c| c.ts)
        .map(|c| c.close.amount())
}

/// Build the strike window around `quote`.
///
/// The centre is `round(quote / step) * step` (midpoints to even), and the window
/// holds `2 * each_side + 1` strikes spaced `step` apart in ascending order.
///
/// # Errors
/// Returns `InvalidArg` when `step` is zero.
pub fn strike_window(quote: Decimal, step: u32, each_side: u32) -> Result<Vec<Decimal>, SnapError> {
    if step == 0 {
        return Err(SnapError::InvalidArg("strike step must be positive".into()));
    }
    let step = Decimal::from(step);
    let base = (quote / step).round() * step;
    let each_side = i64::from(each_side);
    Ok((-each_side..=each_side)
        .map(|i| (base + Decimal::from(i) * step).normalize())
        .collect())
}
