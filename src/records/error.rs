//! Row-level parse errors.

use std::fmt;

/// A single input row that could not be parsed.
///
/// Only the offending row is rejected; the rest of the file is still read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// 1-based line number in the input text.
    pub line: usize,
    /// What was wrong with the row.
    pub message: String,
}

impl RecordError {
    /// Creates an error for `line`.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for RecordError {}
