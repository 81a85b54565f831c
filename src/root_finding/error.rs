//! Error types for bracketed root finding.

use std::fmt;

/// Errors raised before any iteration of the root finder takes place.
#[derive(Debug, Clone, PartialEq)]
pub enum RootFindingError {
    /// The function does not change sign across the interval.
    NotBracketed {
        /// Lower end of the interval.
        a: f64,
        /// Upper end of the interval.
        b: f64,
        /// Function value at `a`.
        fa: f64,
        /// Function value at `b`.
        fb: f64,
    },

    /// An endpoint, or the function value at an endpoint, is not finite.
    InvalidInterval {
        /// Description of the offending value.
        message: String,
    },
}

impl fmt::Display for RootFindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootFindingError::NotBracketed { a, b, fa, fb } => {
                write!(
                    f,
                    "root not bracketed in [{a:.6}, {b:.6}]: f(a)={fa:.6e}, f(b)={fb:.6e}"
                )
            }
            RootFindingError::InvalidInterval { message } => {
                write!(f, "invalid interval: {message}")
            }
        }
    }
}

impl std::error::Error for RootFindingError {}
