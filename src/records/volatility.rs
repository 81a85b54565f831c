//! Option rows for implied volatility batches.

use super::{
    CsvRecord, ParsedRecords, RecordError, expect_fields, format_exp, parse_number, read_rows,
};
use crate::implied_volatility::{OptionSpec, OptionType, VolatilityResult};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Maximum number of option rows read from one input.
pub const MAX_OPTIONS: usize = 100;

/// First column name of the option input and output headers.
pub const VOLATILITY_HEADER_TAG: &str = "problem_type";

const INPUT_FIELDS: usize = 10;

/// One parsed option row.
///
/// Columns: `problem_type,S,K,T,r,C_market,sigma_low,sigma_high,tolerance,max_iterations`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityInputRecord {
    /// 1-based source line.
    pub line: usize,
    /// Parsed contract and solver settings.
    pub spec: OptionSpec,
}

impl VolatilityInputRecord {
    /// Parses one trimmed row.
    pub fn parse(line: usize, row: &StringRecord) -> Result<Self, RecordError> {
        expect_fields(row, INPUT_FIELDS, INPUT_FIELDS, line)?;

        let tag = &row[0];
        let option_type: OptionType = tag
            .parse()
            .map_err(|_| RecordError::new(line, format!("unknown problem type '{tag}'")))?;
        let count = &row[9];
        let max_iterations = count.parse::<u32>().map_err(|_| {
            RecordError::new(
                line,
                format!("field max_iterations: '{count}' is not a count"),
            )
        })?;

        let spec = OptionSpec::new(
            option_type,
            parse_number(row, 1, "S", line)?,
            parse_number(row, 2, "K", line)?,
            parse_number(row, 3, "T", line)?,
            parse_number(row, 4, "r", line)?,
            parse_number(row, 5, "C_market", line)?,
        )
        .with_bracket(
            parse_number(row, 6, "sigma_low", line)?,
            parse_number(row, 7, "sigma_high", line)?,
        )
        .with_tolerance(parse_number(row, 8, "tolerance", line)?)
        .with_max_iterations(max_iterations);

        Ok(Self { line, spec })
    }

    /// The option to solve.
    #[must_use]
    pub fn into_spec(self) -> OptionSpec {
        self.spec
    }
}

/// Reads every option row of `text`, up to [`MAX_OPTIONS`].
pub fn parse_options(text: &str) -> ParsedRecords<VolatilityInputRecord> {
    read_rows(
        text,
        VOLATILITY_HEADER_TAG,
        MAX_OPTIONS,
        VolatilityInputRecord::parse,
    )
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityOutputRecord {
    /// Option type.
    pub option_type: OptionType,
    /// Spot price S.
    pub spot: f64,
    /// Strike K.
    pub strike: f64,
    /// Time to expiry T in years.
    pub time_to_expiry: f64,
    /// Risk-free rate r.
    pub risk_free_rate: f64,
    /// Observed market price.
    pub market_price: f64,
    /// Recovered volatility, 0 on failure.
    pub implied_volatility: f64,
    /// Root finder iterations.
    pub iterations: u32,
    /// Whether the price error fell below tolerance.
    pub converged: bool,
    /// Absolute price error at the recovered volatility.
    pub final_error: f64,
    /// Model price at the recovered volatility.
    pub calculated_price: f64,
    /// Absolute difference to the market price.
    pub price_difference: f64,
    /// Wall-clock time of the inversion in milliseconds.
    pub elapsed_ms: f64,
}

impl VolatilityOutputRecord {
    /// Combines a spec with its inversion result.
    #[must_use]
    pub fn new(spec: &OptionSpec, result: &VolatilityResult) -> Self {
        Self {
            option_type: spec.option_type,
            spot: spec.spot,
            strike: spec.strike,
            time_to_expiry: spec.time_to_expiry,
            risk_free_rate: spec.risk_free_rate,
            market_price: spec.market_price,
            implied_volatility: result.implied_volatility,
            iterations: result.iterations,
            converged: result.converged,
            final_error: result.final_error,
            calculated_price: result.calculated_price,
            price_difference: result.price_difference,
            elapsed_ms: result.elapsed_ms,
        }
    }
}

impl CsvRecord for VolatilityOutputRecord {
    fn csv_header() -> &'static [&'static str] {
        &[
            "problem_type",
            "S",
            "K",
            "T",
            "r",
            "C_market",
            "implied_volatility",
            "iterations",
            "converged",
            "error",
            "calculated_price",
            "price_difference",
            "time_ms",
        ]
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.option_type.tag().to_string(),
            format!("{:.2}", self.spot),
            format!("{:.2}", self.strike),
            format!("{:.6}", self.time_to_expiry),
            format!("{:.3}", self.risk_free_rate),
            format!("{:.2}", self.market_price),
            format!("{:.6}", self.implied_volatility),
            self.iterations.to_string(),
            if self.converged { "yes" } else { "no" }.to_string(),
            format_exp(self.final_error, 2),
            format!("{:.6}", self.calculated_price),
            format!("{:.6}", self.price_difference),
            format!("{:.2}", self.elapsed_ms),
        ]
    }
}
