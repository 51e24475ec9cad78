use optsnap_core::{Candle, Currency, HistoryResponse, IsoCurrency, Money};

use super::spot;

pub fn by_symbol(s: &str) -> Option<HistoryResponse> {
    if s == "NOHIST" {
        return Some(build(vec![]));
    }
    let (close, center) = spot(s)?;
    let prev = center.to_string();
    Some(build(vec![
        ("2025-01-14", prev.as_str(), prev.as_str(), prev.as_str(), prev.as_str(), 9_000_000),
        ("2025-01-15", prev.as_str(), close, prev.as_str(), close, 10_000_000),
    ]))
}

fn usd(s: &str) -> Money {
    Money::from_canonical_str(s, Currency::Iso(IsoCurrency::USD)).unwrap()
}

fn build(rows: Vec<(&str, &str, &str, &str, &str, i64)>) -> HistoryResponse {
    let candles = rows
        .into_iter()
        .map(|(date, o, h, l, c, v)| Candle {
            ts: chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc(),
            open: usd(o),
            high: usd(h),
            low: usd(l),
            close: usd(c),
            close_unadj: None,
            volume: Some(v as u64),
        })
        .collect();
    HistoryResponse {
        candles,
        actions: vec![],
        adjusted: false,
        meta: None,
    }
}
