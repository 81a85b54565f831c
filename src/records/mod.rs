//! Row-oriented CSV records for batch input and output.
//!
//! Every row is independent. Readers skip the header row, blank lines and
//! `#` comments, trim every field, and reject malformed rows one at a time
//! with a [`RecordError`] so a single bad row never spoils a whole file.
//! Readers stop accepting rows once their cap is reached and log how many
//! were ignored.
//!
//! Writers emit a fixed header followed by one row per record with fixed
//! numeric precisions per column.

mod circuit;
mod error;
mod volatility;

pub use circuit::{
    CIRCUIT_HEADER_TAG, CircuitInputRecord, CircuitOutputRecord, MAX_CIRCUITS,
    circuit_output_rows, parse_circuits,
};
pub use error::RecordError;
pub use volatility::{
    MAX_OPTIONS, VOLATILITY_HEADER_TAG, VolatilityInputRecord, VolatilityOutputRecord,
    parse_options,
};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::io;
use tracing::{trace, warn};

/// A record with a fixed CSV layout.
pub trait CsvRecord {
    /// Column names of the header row.
    fn csv_header() -> &'static [&'static str];

    /// Formatted fields of one data row, in header order.
    fn csv_fields(&self) -> Vec<String>;
}

/// Writes the header of `R` followed by one row per record.
///
/// # Returns
/// - `Ok(())` once every row is flushed to `writer`
/// - `Err(RecordError)` naming the output line that could not be written
pub fn write_csv<W: io::Write, R: CsvRecord>(writer: W, rows: &[R]) -> Result<(), RecordError> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer
        .write_record(R::csv_header())
        .map_err(|error| RecordError::new(1, format!("cannot write header: {error}")))?;
    for (index, row) in rows.iter().enumerate() {
        csv_writer
            .write_record(row.csv_fields())
            .map_err(|error| RecordError::new(index + 2, format!("cannot write row: {error}")))?;
    }
    csv_writer
        .flush()
        .map_err(|error| RecordError::new(rows.len() + 1, format!("cannot flush: {error}")))
}

/// Serializes `rows` as CSV text: the header, then one line per row.
pub fn to_csv<R: CsvRecord>(rows: &[R]) -> Result<String, RecordError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|error| RecordError::new(0, error.to_string()))
}

/// Outcome of reading one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecords<T> {
    /// Rows parsed successfully, in file order.
    pub records: Vec<T>,
    /// Rows rejected, in file order.
    pub errors: Vec<RecordError>,
    /// Data rows past the cap that were not read.
    pub ignored: usize,
}

impl<T> ParsedRecords<T> {
    /// True when no row was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Shared reader loop.
///
/// Rows may have differing lengths; each parser checks its own field count.
/// `header_tag` is the first column name of the header row. Rows whose first
/// field equals it are skipped wherever they appear.
pub(crate) fn read_rows<T, F>(
    text: &str,
    header_tag: &str,
    cap: usize,
    mut parse: F,
) -> ParsedRecords<T>
where
    F: FnMut(usize, &StringRecord) -> Result<T, RecordError>,
{
    let mut parsed = ParsedRecords {
        records: Vec::new(),
        errors: Vec::new(),
        ignored: 0,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(error) => {
                let line = error.position().map_or(0, |position| position.line() as usize);
                let error = RecordError::new(line, format!("unreadable row: {error}"));
                warn!("rejected row: {error}");
                parsed.errors.push(error);
                continue;
            }
        };

        let line = row.position().map_or(0, |position| position.line() as usize);
        if row.iter().all(str::is_empty) {
            continue;
        }
        if row.get(0) == Some(header_tag) {
            trace!("line {line}: header skipped");
            continue;
        }

        if parsed.records.len() >= cap {
            parsed.ignored += 1;
            continue;
        }

        match parse(line, &row) {
            Ok(record) => parsed.records.push(record),
            Err(error) => {
                warn!("rejected row: {error}");
                parsed.errors.push(error);
            }
        }
    }

    if parsed.ignored > 0 {
        warn!(
            "input cap of {} rows reached, {} further rows ignored",
            cap, parsed.ignored
        );
    }

    parsed
}

/// Parses field `index` as `f64`. Range checks happen during validation.
pub(crate) fn parse_number(
    row: &StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<f64, RecordError> {
    let raw = row
        .get(index)
        .ok_or_else(|| RecordError::new(line, format!("missing field {name}")))?;
    raw.parse::<f64>()
        .map_err(|_| RecordError::new(line, format!("field {name}: '{raw}' is not a number")))
}

/// Scientific notation with a signed, two-digit exponent (`1.50e-05`).
pub(crate) fn format_exp(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}

/// Checks the field count against the accepted range.
pub(crate) fn expect_fields(
    row: &StringRecord,
    min: usize,
    max: usize,
    line: usize,
) -> Result<(), RecordError> {
    if row.len() < min || row.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min} or {max}")
        };
        return Err(RecordError::new(
            line,
            format!("expected {expected} fields, got {}", row.len()),
        ));
    }
    Ok(())
}
