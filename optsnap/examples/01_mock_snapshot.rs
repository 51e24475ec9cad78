//! Offline snapshot run against the fixture connector.
//!
//! Writes into a fresh directory under the system temp dir and prints the
//! resulting file contents.
use std::sync::Arc;

use optsnap::Snapshotter;
use optsnap_mock::MockConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out = std::env::temp_dir().join("optsnap-mock-demo");
    std::fs::create_dir_all(&out)?;

    let snap = Snapshotter::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .tickers(["SPY", "NVDA", "FAIL", "NOHIST", "MSFT"])
        .output_dir(&out)
        .build()?;

    let report = snap.run().await;
    for outcome in &report.outcomes {
        println!("{outcome}");
    }
    println!(
        "\n{} rows written, {} tickers failed",
        report.rows_written(),
        report.failures().count()
    );

    for outcome in &report.outcomes {
        if let optsnap::TickerOutcome::Saved { file, .. } = outcome {
            println!("\n--- {file} ---");
            print!("{}", std::fs::read_to_string(out.join(file))?);
        }
    }
    Ok(())
}
