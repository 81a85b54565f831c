//! Derivative-free root finding on a bracketing interval.
//!
//! The solver here knows nothing about options or circuits: it takes any
//! continuous scalar function and an interval across which the function
//! changes sign.

mod brent;
mod error;

pub use brent::{BrentConfig, MACHINE_EPSILON, RootEstimate, find_root};
pub use error::RootFindingError;
