use std::sync::Arc;

use optsnap::Snapshotter;
use optsnap_yfinance::YfConnector;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log filtering via RUST_LOG; result lines always go to stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let snap = Snapshotter::builder()
        .with_connector(Arc::new(YfConnector::try_new_default()?))
        .build()?;

    let report = snap.run().await;
    for outcome in &report.outcomes {
        println!("{outcome}");
    }
    Ok(())
}
