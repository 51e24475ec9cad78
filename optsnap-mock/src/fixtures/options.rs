use chrono::DateTime;
use optsnap_core::{
    AssetKind, Currency, Decimal, Instrument, IsoCurrency, Money, OptionChain, OptionContract,
};

use super::spot;

/// 2025-01-17 00:00:00 UTC.
pub const NEAREST_EXPIRATION: i64 = 1_737_072_000;
/// 2025-01-24 00:00:00 UTC.
pub const NEXT_EXPIRATION: i64 = 1_737_676_800;

/// Strikes listed on each side of the fixture centre.
const LISTED_EACH_SIDE: i64 = 8;
/// Offset from the centre where no put is listed.
const MISSING_PUT_OFFSET: i64 = 15;

pub fn expirations_by_symbol(s: &str) -> Option<Vec<i64>> {
    match s {
        "NOOPT" => Some(vec![]),
        _ => spot(s).map(|_| vec![NEAREST_EXPIRATION, NEXT_EXPIRATION]),
    }
}

pub fn chain_by_symbol_and_date(s: &str, date: Option<i64>) -> Option<OptionChain> {
    let expiration = date.unwrap_or(NEAREST_EXPIRATION);
    if !expirations_by_symbol(s)?.contains(&expiration) {
        return None;
    }
    if s == "EMPTYCHAIN" {
        return Some(OptionChain {
            calls: vec![],
            puts: vec![],
        });
    }
    let (_, center) = spot(s)?;
    let strikes = (-LISTED_EACH_SIDE..=LISTED_EACH_SIDE).map(|i| center + i * 5);
    let calls = strikes
        .clone()
        .map(|k| contract(s, expiration, 'C', k, center))
        .collect();
    let puts = strikes
        .filter(|k| *k != center + MISSING_PUT_OFFSET)
        .map(|k| contract(s, expiration, 'P', k, center))
        .collect();
    Some(OptionChain { calls, puts })
}

fn usd(v: Decimal) -> Money {
    Money::new(v, Currency::Iso(IsoCurrency::USD)).unwrap()
}

fn contract(s: &str, expiration: i64, side: char, strike: i64, center: i64) -> OptionContract {
    let expires = DateTime::from_timestamp(expiration, 0).unwrap();
    let symbol = format!(
        "{s}{}{side}{:08}",
        expires.format("%y%m%d"),
        strike * 1000
    );
    let intrinsic = if side == 'C' {
        (center - strike).max(0)
    } else {
        (strike - center).max(0)
    };
    // Flat extrinsic value of 2.50 on top of intrinsic.
    let last = Decimal::from(intrinsic) + Decimal::new(250, 2);
    let distance = (strike - center).unsigned_abs();
    OptionContract {
        instrument: Instrument::from_symbol(&symbol, AssetKind::Equity).unwrap(),
        strike: usd(Decimal::from(strike)),
        price: Some(usd(last)),
        bid: Some(usd(last - Decimal::new(5, 2))),
        ask: Some(usd(last + Decimal::new(5, 2))),
        volume: Some(1_000 / (distance + 1)),
        open_interest: Some(5_000 / (distance + 1)),
        implied_volatility: Some(0.2 + 0.001 * distance as f64),
        in_the_money: intrinsic > 0,
        expiration_at: Some(expires),
        expiration_date: expires.date_naive(),
        greeks: None,
        last_trade_at: None,
    }
}
