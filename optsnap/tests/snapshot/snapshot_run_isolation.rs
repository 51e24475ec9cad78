use crate::helpers::{EXPIRY, EXPIRY_LABEL, MockConnector, contract, history_of, lines_of};
use optsnap::{OptionChain, SnapError, Snapshotter, TickerOutcome};

#[tokio::test]
async fn failing_ticker_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let c = MockConnector::builder()
        .with_history_fn(|i, _r| match i.symbol().to_string().as_str() {
            "EMPTY" => Ok(history_of(&[])),
            _ => Ok(history_of(&[(1, "101.2")])),
        })
        .returns_options_expirations_ok(vec![EXPIRY])
        .returns_option_chain_ok(OptionChain {
            calls: vec![contract("X250117C00100000", 100, "2.00")],
            puts: vec![contract("X250117P00100000", 100, "1.00")],
        })
        .build();
    let snap = Snapshotter::builder()
        .with_connector(c)
        .tickers(["EMPTY", "AMD"])
        .output_dir(dir.path())
        .build()
        .unwrap();

    let report = snap.run().await;
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(
        report.outcomes[0],
        TickerOutcome::Failed {
            symbol: "EMPTY".into(),
            error: SnapError::no_data("price history for EMPTY"),
        }
    );
    assert_eq!(
        report.outcomes[0].to_string(),
        "[EMPTY] Error: No data found: price history for EMPTY"
    );
    assert!(report.outcomes[1].is_saved());
    assert_eq!(report.failures().count(), 1);

    assert!(!dir.path().join("EMPTY_options_2025-01-17.csv").exists());
    assert!(dir.path().join("AMD_options_2025-01-17.csv").exists());
}

#[tokio::test]
async fn one_run_fetches_and_appends_each_ticker_once() {
    let dir = tempfile::tempdir().unwrap();
    let c = MockConnector::builder()
        .returns_history_ok(history_of(&[(1, "101.2")]))
        .returns_options_expirations_ok(vec![EXPIRY, EXPIRY + 7 * 86_400])
        .with_option_chain_fn(|_i, date| {
            assert_eq!(date, Some(EXPIRY));
            Ok(OptionChain {
                calls: vec![
                    contract("AMD250117C00095000", 95, "7.10"),
                    contract("AMD250117C00100000", 100, "3.20"),
                    contract("AMD250117C00105000", 105, "0.90"),
                ],
                puts: vec![
                    contract("AMD250117P00095000", 95, "0.40"),
                    contract("AMD250117P00100000", 100, "1.30"),
                    contract("AMD250117P00105000", 105, "4.60"),
                ],
            })
        })
        .build();
    let snap = Snapshotter::builder()
        .with_connector(c.clone())
        .tickers(["AMD"])
        .output_dir(dir.path())
        .build()
        .unwrap();

    let report = snap.run().await;
    assert_eq!(report.outcomes.len(), 1);
    let TickerOutcome::Saved { file, rows, .. } = &report.outcomes[0] else {
        panic!("expected saved outcome, got {:?}", report.outcomes[0]);
    };
    assert_eq!(*rows, 3);
    assert_eq!(file, &format!("AMD_options_{EXPIRY_LABEL}.csv"));

    // history, expirations, chain
    assert_eq!(c.calls(), 3);
    let lines = lines_of(&dir.path().join(file));
    assert_eq!(lines.len(), 1 + 3);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn empty_ticker_list_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let c = MockConnector::builder()
        .returns_history_ok(history_of(&[(1, "10")]))
        .build();
    let snap = Snapshotter::builder()
        .with_connector(c.clone())
        .tickers(Vec::<String>::new())
        .output_dir(dir.path())
        .build()
        .unwrap();

    let report = snap.run().await;
    assert!(report.outcomes.is_empty());
    assert_eq!(c.calls(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn output_failure_is_reported_per_ticker() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let c = MockConnector::builder()
        .returns_history_ok(history_of(&[(1, "100")]))
        .returns_options_expirations_ok(vec![EXPIRY])
        .returns_option_chain_ok(OptionChain {
            calls: vec![],
            puts: vec![],
        })
        .build();
    let snap = Snapshotter::builder()
        .with_connector(c)
        .tickers(["A", "B"])
        .output_dir(&missing)
        .build()
        .unwrap();

    let report = snap.run().await;
    assert_eq!(report.outcomes.len(), 2);
    for outcome in &report.outcomes {
        match outcome {
            TickerOutcome::Failed { error, .. } => {
                assert!(matches!(error, SnapError::Io { .. }));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
