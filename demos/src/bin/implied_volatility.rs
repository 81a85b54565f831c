//! Batch implied volatility recovery from a CSV file.
//!
//! Usage: `implied_volatility [INPUT] [OUTPUT] [WORKERS]`
//!
//! Defaults to `data-io/data.csv` and `data-io/results.csv` on one thread.
//! Set `RUST_LOG=debug` to see every solve.

use numerics_rs::batch::{BatchConfig, run_volatility_file};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "data-io/data.csv".to_string()));
    let output = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "data-io/results.csv".to_string()),
    );
    let workers = match args.next() {
        Some(raw) => raw.parse::<usize>()?,
        None => 1,
    };

    info!(
        "Recovering implied volatilities from {} with {} worker(s)",
        input.display(),
        workers
    );

    let config = BatchConfig::new().with_workers(workers);
    let summary = run_volatility_file(&input, &output, &config)?;

    info!("Total options processed: {}", summary.total);
    info!("Converged: {}", summary.succeeded);
    info!("Not converged: {}", summary.failed);
    info!("Results written to {}", output.display());

    Ok(())
}
