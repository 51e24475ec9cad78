use std::str::FromStr;
use std::time::Duration;

use crate::helpers::{MockConnector, history_of, instrument};
use optsnap::{Decimal, SnapError, Snapshotter};
use optsnap_core::{Interval, Range};

#[tokio::test]
async fn latest_candle_close_is_rounded_to_cents() {
    let c = MockConnector::builder()
        .with_history_fn(|i, req| {
            assert_eq!(i.symbol().to_string(), "SPY");
            assert_eq!(req.range(), Some(Range::D1));
            assert_eq!(req.interval(), Interval::D1);
            // Deliberately out of order: the most recent candle wins.
            Ok(history_of(&[(1_736_985_600, "437.8213"), (1_736_899_200, "431.00")]))
        })
        .build();
    let snap = Snapshotter::builder().with_connector(c).build().unwrap();

    let price = snap.latest_price(&instrument("SPY")).await.unwrap();
    assert_eq!(price, Decimal::from_str("437.82").unwrap());
}

#[tokio::test]
async fn empty_history_is_no_data() {
    let c = MockConnector::builder()
        .returns_history_ok(history_of(&[]))
        .build();
    let snap = Snapshotter::builder().with_connector(c).build().unwrap();

    let err = snap.latest_price(&instrument("SPY")).await.unwrap_err();
    assert_eq!(err, SnapError::no_data("price history for SPY"));
    assert_eq!(err.to_string(), "No data found: price history for SPY");
}

#[tokio::test]
async fn missing_history_capability_is_unsupported() {
    let c = MockConnector::builder()
        .returns_options_expirations_ok(vec![1])
        .build();
    let snap = Snapshotter::builder().with_connector(c).build().unwrap();

    let err = snap.latest_price(&instrument("SPY")).await.unwrap_err();
    assert_eq!(err, SnapError::unsupported("history"));
}

#[tokio::test]
async fn first_capable_connector_serves_the_call() {
    let options_only = MockConnector::builder()
        .name("options_only")
        .returns_options_expirations_ok(vec![1])
        .build();
    let history = MockConnector::builder()
        .name("history")
        .returns_history_ok(history_of(&[(1, "12.345")]))
        .build();
    let snap = Snapshotter::builder()
        .with_connector(options_only.clone())
        .with_connector(history.clone())
        .build()
        .unwrap();

    let price = snap.latest_price(&instrument("X")).await.unwrap();
    // 12.345 rounds half to even.
    assert_eq!(price, Decimal::from_str("12.34").unwrap());
    assert_eq!(options_only.calls(), 0);
    assert_eq!(history.calls(), 1);
}

#[tokio::test]
async fn connector_without_daily_candles_is_skipped() {
    let weekly = MockConnector::builder()
        .name("weekly")
        .with_history_intervals(&[Interval::W1])
        .returns_history_ok(history_of(&[(1, "99")]))
        .build();
    let snap = Snapshotter::builder()
        .with_connector(weekly.clone())
        .build()
        .unwrap();
    let err = snap.latest_price(&instrument("SPY")).await.unwrap_err();
    assert_eq!(err, SnapError::unsupported("history"));
    assert_eq!(weekly.calls(), 0);

    let daily = MockConnector::builder()
        .name("daily")
        .returns_history_ok(history_of(&[(1, "20.5")]))
        .build();
    let snap = Snapshotter::builder()
        .with_connector(weekly.clone())
        .with_connector(daily.clone())
        .build()
        .unwrap();
    let price = snap.latest_price(&instrument("SPY")).await.unwrap();
    assert_eq!(price, Decimal::from_str("20.50").unwrap());
    assert_eq!(weekly.calls(), 0);
    assert_eq!(daily.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out_when_bounded() {
    let c = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_secs(30))
        .returns_history_ok(history_of(&[(1, "10")]))
        .build();
    let snap = Snapshotter::builder()
        .with_connector(c)
        .provider_timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    let err = snap.latest_price(&instrument("SPY")).await.unwrap_err();
    assert_eq!(err, SnapError::provider_timeout("slow", "history"));
}
