//! Batch drivers for both engines.
//!
//! Every record is solved in isolation: a failing record is counted and
//! logged, and the batch moves on. Results always come back in input order,
//! whether the batch ran on one thread or several.

use crate::implied_volatility::{OptionSpec, VolatilityResult, solve_iv};
use crate::records::{
    CircuitOutputRecord, CsvRecord, VolatilityOutputRecord, circuit_output_rows, parse_circuits,
    parse_options, write_csv,
};
use crate::transient::{CircuitError, CircuitSpec, SimulationConfig, Trajectory, simulate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::thread;
use tracing::{debug, info, warn};

/// Aggregate outcome counts of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Records processed.
    pub total: usize,
    /// Records that converged or simulated successfully.
    pub succeeded: usize,
    /// Records that did not.
    pub failed: usize,
}

impl BatchSummary {
    /// Counts one record.
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Adds the counts of `other`.
    pub fn merge(&mut self, other: &BatchSummary) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} succeeded, {} failed",
            self.total, self.succeeded, self.failed
        )
    }
}

/// Settings shared by the batch drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads; 1 runs on the calling thread.
    pub workers: usize,
    /// Records beyond this count are skipped.
    pub max_records: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            max_records: usize::MAX,
        }
    }
}

impl BatchConfig {
    /// Sequential configuration without a record cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the record cap.
    #[must_use]
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    fn limit<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        if records.len() > self.max_records {
            warn!(
                "batch limited to {} of {} records",
                self.max_records,
                records.len()
            );
            &records[..self.max_records]
        } else {
            records
        }
    }
}

/// I/O failure in a file-level batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Input could not be read.
    Read {
        /// File path.
        path: String,
        /// Underlying I/O message.
        message: String,
    },

    /// Output could not be written.
    Write {
        /// File path.
        path: String,
        /// Underlying I/O message.
        message: String,
    },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Read { path, message } => {
                write!(f, "cannot read {path}: {message}")
            }
            BatchError::Write { path, message } => {
                write!(f, "cannot write {path}: {message}")
            }
        }
    }
}

impl std::error::Error for BatchError {}

/// Maps `f` over `items` on up to `workers` scoped threads, keeping order.
fn map_ordered<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync,
{
    if workers <= 1 || items.len() <= 1 {
        return items.iter().enumerate().map(|(i, item)| f(i, item)).collect();
    }

    let chunk_size = items.len().div_ceil(workers);
    let f = &f;
    thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let offset = chunk_index * chunk_size;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, item)| f(offset + i, item))
                        .collect::<Vec<R>>()
                })
            })
            .collect();

        let mut results = Vec::with_capacity(items.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk) => results.extend(chunk),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        results
    })
}

fn solve_one(index: usize, spec: &OptionSpec) -> VolatilityResult {
    let result = solve_iv(spec);
    if result.converged {
        debug!(
            "option {} ({}, K={:.2}): IV={:.4}",
            index + 1,
            spec.option_type,
            spec.strike,
            result.implied_volatility
        );
    } else {
        warn!(
            "option {} ({}, K={:.2}) did not converge: {}",
            index + 1,
            spec.option_type,
            spec.strike,
            result
                .failure
                .as_ref()
                .map_or_else(|| "tolerance not reached".to_string(), ToString::to_string)
        );
    }
    result
}

fn summarize_options(results: &[VolatilityResult]) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for result in results {
        summary.record(result.converged);
    }
    info!("options: {summary}");
    summary
}

/// Solves every spec on the calling thread.
pub fn solve_all(specs: &[OptionSpec]) -> (Vec<VolatilityResult>, BatchSummary) {
    solve_all_parallel(specs, 1)
}

/// Solves every spec on up to `workers` threads.
pub fn solve_all_parallel(
    specs: &[OptionSpec],
    workers: usize,
) -> (Vec<VolatilityResult>, BatchSummary) {
    let results = map_ordered(specs, workers, solve_one);
    let summary = summarize_options(&results);
    (results, summary)
}

fn simulate_one(
    index: usize,
    spec: &CircuitSpec,
    config: &SimulationConfig,
) -> Result<Trajectory, CircuitError> {
    match simulate(spec, config) {
        Ok(trajectory) => {
            debug!(
                "circuit {} ({}): {} samples, final V={:.4}",
                index + 1,
                spec.kind(),
                trajectory.len(),
                trajectory.final_state().v
            );
            Ok(trajectory)
        }
        Err(error) => {
            warn!("circuit {} ({}) failed: {error}", index + 1, spec.kind());
            Err(error)
        }
    }
}

fn summarize_circuits(results: &[Result<Trajectory, CircuitError>]) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for result in results {
        summary.record(result.is_ok());
    }
    info!("circuits: {summary}");
    summary
}

/// Simulates every circuit on the calling thread.
pub fn simulate_all(
    specs: &[CircuitSpec],
    config: &SimulationConfig,
) -> (Vec<Result<Trajectory, CircuitError>>, BatchSummary) {
    simulate_all_parallel(specs, config, 1)
}

/// Simulates every circuit on up to `workers` threads.
pub fn simulate_all_parallel(
    specs: &[CircuitSpec],
    config: &SimulationConfig,
    workers: usize,
) -> (Vec<Result<Trajectory, CircuitError>>, BatchSummary) {
    let results = map_ordered(specs, workers, |index, spec| {
        simulate_one(index, spec, config)
    });
    let summary = summarize_circuits(&results);
    (results, summary)
}

fn read_input(path: &Path) -> Result<String, BatchError> {
    fs::read_to_string(path).map_err(|error| BatchError::Read {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

fn write_output<R: CsvRecord>(path: &Path, rows: &[R]) -> Result<(), BatchError> {
    let file = File::create(path).map_err(|error| BatchError::Write {
        path: path.display().to_string(),
        message: error.to_string(),
    })?;
    write_csv(BufWriter::new(file), rows).map_err(|error| BatchError::Write {
        path: path.display().to_string(),
        message: error.to_string(),
    })
}

/// Reads option rows from `input`, solves them and writes one result row
/// per parsed option to `output`.
///
/// Rejected input rows are logged and counted as failures.
pub fn run_volatility_file(
    input: &Path,
    output: &Path,
    config: &BatchConfig,
) -> Result<BatchSummary, BatchError> {
    let parsed = parse_options(&read_input(input)?);
    let specs: Vec<OptionSpec> = parsed.records.iter().map(|record| record.spec).collect();
    let specs = config.limit(&specs);

    let (results, mut summary) = solve_all_parallel(specs, config.workers);
    let rows: Vec<VolatilityOutputRecord> = specs
        .iter()
        .zip(&results)
        .map(|(spec, result)| VolatilityOutputRecord::new(spec, result))
        .collect();
    write_output(output, &rows)?;

    summary.merge(&BatchSummary {
        total: parsed.errors.len(),
        succeeded: 0,
        failed: parsed.errors.len(),
    });
    info!(
        "{} -> {}: {summary}",
        input.display(),
        output.display()
    );
    Ok(summary)
}

/// Reads circuit rows from `input`, simulates them and writes one row per
/// recorded sample to `output`.
///
/// Circuits that fail validation contribute no rows.
pub fn run_transient_file(
    input: &Path,
    output: &Path,
    simulation: &SimulationConfig,
    config: &BatchConfig,
) -> Result<BatchSummary, BatchError> {
    let parsed = parse_circuits(&read_input(input)?);
    let specs: Vec<CircuitSpec> = parsed.records.iter().map(|record| record.spec).collect();
    let specs = config.limit(&specs);

    let (results, mut summary) = simulate_all_parallel(specs, simulation, config.workers);
    let rows: Vec<CircuitOutputRecord> = specs
        .iter()
        .zip(&results)
        .filter_map(|(spec, result)| {
            result
                .as_ref()
                .ok()
                .map(|trajectory| circuit_output_rows(spec, trajectory))
        })
        .flatten()
        .collect();
    write_output(output, &rows)?;

    summary.merge(&BatchSummary {
        total: parsed.errors.len(),
        succeeded: 0,
        failed: parsed.errors.len(),
    });
    info!(
        "{} -> {}: {summary}",
        input.display(),
        output.display()
    );
    Ok(summary)
}
