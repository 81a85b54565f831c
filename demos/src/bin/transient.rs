//! Batch RK4 transient analysis of diode circuits from a CSV file.
//!
//! Usage: `transient [INPUT] [OUTPUT] [WORKERS] [MAX_SAMPLES]`
//!
//! Defaults to `data-io/transient_data.csv` and
//! `data-io/transient_results.csv` on one thread with the default sample cap.

use numerics_rs::batch::{BatchConfig, run_transient_file};
use numerics_rs::transient::{MAX_TIME_STEPS, SimulationConfig};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let input = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "data-io/transient_data.csv".to_string()),
    );
    let output = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "data-io/transient_results.csv".to_string()),
    );
    let workers = match args.next() {
        Some(raw) => raw.parse::<usize>()?,
        None => 1,
    };
    let max_samples = match args.next() {
        Some(raw) => raw.parse::<usize>()?,
        None => MAX_TIME_STEPS,
    };

    info!(
        "Simulating circuits from {} with {} worker(s), at most {} samples each",
        input.display(),
        workers,
        max_samples
    );

    let simulation = SimulationConfig::new().with_max_samples(max_samples);
    let config = BatchConfig::new().with_workers(workers);
    let summary = run_transient_file(&input, &output, &simulation, &config)?;

    info!("Total circuits analysed: {}", summary.total);
    info!("Simulated: {}", summary.succeeded);
    info!("Rejected: {}", summary.failed);
    info!("Samples written to {}", output.display());

    Ok(())
}
