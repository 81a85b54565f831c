//! Error types for implied volatility inversion.

use std::fmt;

/// Errors specific to IV inversion.
///
/// None of these abort a batch: the solver records them in the returned
/// [`VolatilityResult`](super::VolatilityResult) and the caller moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum IVError {
    /// Invalid input parameters (non-positive price, negative rate, bad bracket order).
    InvalidInput {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Market price is below the discounted intrinsic value.
    BelowIntrinsic {
        /// Market price observed.
        price: f64,
        /// Discounted intrinsic value.
        intrinsic: f64,
    },

    /// The price error does not change sign across the volatility bracket.
    InvalidBracket {
        /// Lower end of the bracket.
        sigma_low: f64,
        /// Upper end of the bracket.
        sigma_high: f64,
        /// Price error at the lower end.
        f_low: f64,
        /// Price error at the upper end.
        f_high: f64,
    },

    /// Root finder exhausted its iteration budget without meeting tolerance.
    /// The best estimate is still reported.
    IterationCapReached {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last IV estimate before giving up.
        last_iv: f64,
    },

    /// The bracket narrowed below the tolerance while the price error was
    /// still above it.
    ToleranceNotReached {
        /// Absolute price error at the returned estimate.
        final_error: f64,
        /// Requested price tolerance.
        tolerance: f64,
    },
}

impl fmt::Display for IVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IVError::InvalidInput { message } => {
                write!(f, "invalid input: {message}")
            }
            IVError::BelowIntrinsic { price, intrinsic } => {
                write!(
                    f,
                    "price {price:.4} is below intrinsic value {intrinsic:.4}"
                )
            }
            IVError::InvalidBracket {
                sigma_low,
                sigma_high,
                f_low,
                f_high,
            } => {
                write!(
                    f,
                    "volatility bracket [{sigma_low:.4}, {sigma_high:.4}] does not straddle a root: f_low={f_low:.6}, f_high={f_high:.6}"
                )
            }
            IVError::IterationCapReached {
                iterations,
                last_iv,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last IV: {last_iv:.4}"
                )
            }
            IVError::ToleranceNotReached {
                final_error,
                tolerance,
            } => {
                write!(
                    f,
                    "bracket collapsed with price error {final_error:.2e} above tolerance {tolerance:.2e}"
                )
            }
        }
    }
}

impl std::error::Error for IVError {}
