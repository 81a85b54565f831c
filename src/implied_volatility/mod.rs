//! Implied volatility recovery by Black-Scholes inversion.
//!
//! # Overview
//!
//! Implied Volatility (IV) is the volatility that, fed into the Black-Scholes
//! formula, reproduces an observed option price. The price of an option in
//! currency units and its IV are the same information in different units.
//!
//! # Inversion
//!
//! There is no closed-form inverse of Black-Scholes. Each inversion binds its
//! own [`OptionSpec`] into a [`VolatilityObjective`],
//! `f(σ) = BS(σ) - market_price`, and finds its root with Brent's method on
//! the bracket `[sigma_low, sigma_high]` carried by the option spec. Brent needs no
//! vega, which keeps it robust for deep in- or out-of-the-money contracts
//! where vega vanishes.
//!
//! Before solving, the option spec is validated and the market price is checked
//! against the discounted intrinsic value; the bracket must straddle a sign
//! change of `f`.
//!
//! # Example
//!
//! ```
//! use numerics_rs::implied_volatility::{OptionSpec, solve_iv};
//!
//! let spec = OptionSpec::call(100.0, 100.0, 1.0, 0.05, 10.4506)
//!     .with_bracket(0.01, 3.0)
//!     .with_tolerance(1e-6)
//!     .with_max_iterations(100);
//!
//! let result = solve_iv(&spec);
//! println!("IV: {:.2}% in {} iterations", result.iv_percent(), result.iterations);
//! ```

mod black_scholes;
mod error;
mod objective;
mod solver;
mod types;

pub use black_scholes::BlackScholes;
pub use error::IVError;
pub use objective::VolatilityObjective;
pub use solver::{solve_iv, try_solve_iv, validate_spec};
pub use types::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_SIGMA_HIGH, DEFAULT_SIGMA_LOW, DEFAULT_TOLERANCE,
    OptionSpec, OptionType, VolatilityResult,
};
