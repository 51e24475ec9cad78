pub mod history;
pub mod options;

/// Raw last close and the strike the fixture chain is listed around.
pub(crate) fn spot(s: &str) -> Option<(&'static str, i64)> {
    match s {
        "SPY" => Some(("437.8213", 440)),
        "NVDA" => Some(("118.404", 120)),
        "TSLA" => Some(("251.4449", 250)),
        "AAPL" => Some(("227.52", 230)),
        "MSFT" => Some(("415.1", 415)),
        // History and expirations exist, but the chain lists nothing.
        "EMPTYCHAIN" => Some(("52.3", 50)),
        // History exists, but no options are listed.
        "NOOPT" => Some(("99.99", 100)),
        _ => None,
    }
}
