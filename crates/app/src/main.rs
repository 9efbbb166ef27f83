//! Apicheck demo binary.
//!
//! Starts a test session, registers a small in-process API, runs a suite of
//! requests against it and prints the report. The exit code is 1 when any
//! test failed.

mod demo;

use apicheck_infrastructure::TestSession;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so the report owns stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting apicheck v{}", env!("CARGO_PKG_VERSION"));

    let mut session = TestSession::from_env()?;
    session.merge(demo::router());

    for spec in demo::suite() {
        session.run(spec);
    }

    session.report(true);
    Ok(())
}
