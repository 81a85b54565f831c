//! # numerics-rs
//!
//! Two independent numerical engines over explicit, typed input records:
//!
//! - **Implied volatility**: recovers the volatility that makes the
//!   Black-Scholes price of a European call or put match an observed market
//!   price, by bracketed Brent root-finding on the price error.
//! - **Diode circuit transients**: integrates RC and RLC circuits with a
//!   series nonlinear diode using fixed-step classical Runge-Kutta (RK4). Each
//!   derivative evaluation of the RC circuit resolves the diode current with a
//!   short fixed-point iteration.
//!
//! Both engines are pure functions of their inputs. Nothing is shared between
//! calls, so batches can be spread across threads freely (see [`batch`]).
//!
//! ## Modules
//!
//! - [`implied_volatility`]: Black-Scholes pricer, volatility objective and
//!   the inversion orchestrator.
//! - [`root_finding`]: derivative-free Brent solver usable with any
//!   continuous scalar function.
//! - [`transient`]: diode model, circuit derivative functions, RK4 integrator
//!   and checksum-validated trajectory packages.
//! - [`records`]: row-oriented CSV schemas for inputs and outputs.
//! - [`batch`]: per-record isolation and aggregate success/failure counts.
//!
//! ## Example
//!
//! ```
//! use numerics_rs::prelude::*;
//!
//! let spec = OptionSpec::call(100.0, 100.0, 1.0, 0.05, 10.4506)
//!     .with_bracket(0.01, 3.0)
//!     .with_tolerance(1e-6);
//! let result = solve_iv(&spec);
//! assert!(result.converged);
//! assert!((result.implied_volatility - 0.2).abs() < 1e-3);
//! ```

pub mod batch;
pub mod implied_volatility;
pub mod prelude;
pub mod records;
pub mod root_finding;
pub mod transient;
mod utils;

pub use utils::elapsed_ms;
