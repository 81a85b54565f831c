//! Implied volatility inversion.
//!
//! Validates an [`OptionSpec`], checks that the price error changes sign
//! across the volatility bracket, runs Brent's method on the
//! [`VolatilityObjective`] and re-prices the option at the recovered
//! volatility. Convergence is judged here, from the re-evaluated price
//! error, not by the root finder.

use super::black_scholes::BlackScholes;
use super::error::IVError;
use super::objective::VolatilityObjective;
use super::types::{OptionSpec, VolatilityResult};
use crate::root_finding::{BrentConfig, MACHINE_EPSILON, RootFindingError, find_root};
use crate::utils::elapsed_ms;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Validates input parameters for IV inversion.
///
/// # Arguments
/// - `spec`: Option spec to validate
///
/// # Returns
/// - `Ok(())` if the option spec is usable
/// - `Err(IVError::InvalidInput)` if any field is out of range
/// - `Err(IVError::BelowIntrinsic)` if the market price violates the
///   no-arbitrage lower bound
pub fn validate_spec(spec: &OptionSpec) -> Result<(), IVError> {
    let fields = [
        ("spot", spec.spot),
        ("strike", spec.strike),
        ("time to expiry", spec.time_to_expiry),
        ("risk-free rate", spec.risk_free_rate),
        ("market price", spec.market_price),
        ("sigma low", spec.sigma_low),
        ("sigma high", spec.sigma_high),
        ("tolerance", spec.tolerance),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
        return Err(IVError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }

    let positive = [
        ("spot price", spec.spot),
        ("strike price", spec.strike),
        ("time to expiry", spec.time_to_expiry),
        ("market price", spec.market_price),
        ("tolerance", spec.tolerance),
    ];
    if let Some((name, value)) = positive.iter().find(|(_, value)| *value <= 0.0) {
        return Err(IVError::InvalidInput {
            message: format!("{name} must be positive, got {value}"),
        });
    }

    if spec.risk_free_rate < 0.0 {
        return Err(IVError::InvalidInput {
            message: format!(
                "risk-free rate must be non-negative, got {}",
                spec.risk_free_rate
            ),
        });
    }

    if spec.max_iterations == 0 {
        return Err(IVError::InvalidInput {
            message: "iteration budget must be at least 1".to_string(),
        });
    }

    if spec.sigma_low < 0.0 || spec.sigma_low >= spec.sigma_high {
        return Err(IVError::InvalidInput {
            message: format!(
                "volatility bracket must satisfy 0 <= low < high, got [{}, {}]",
                spec.sigma_low, spec.sigma_high
            ),
        });
    }

    let intrinsic = spec.intrinsic_value();
    if spec.market_price < intrinsic {
        return Err(IVError::BelowIntrinsic {
            price: spec.market_price,
            intrinsic,
        });
    }

    Ok(())
}

/// Solves for implied volatility, surfacing pre-solve failures as errors.
///
/// # Arguments
/// - `spec`: Option contract, market price and solver settings
///
/// # Returns
/// - `Ok(VolatilityResult)`: The solve ran. `converged` tells whether the
///   price error met the tolerance. Otherwise `failure` carries
///   [`IVError::IterationCapReached`] when the iteration budget ran out, or
///   [`IVError::ToleranceNotReached`] when the bracket collapsed first.
/// - `Err(IVError)`: Invalid input, price below intrinsic, or a bracket that
///   does not straddle a root. No solve was attempted.
pub fn try_solve_iv(spec: &OptionSpec) -> Result<VolatilityResult, IVError> {
    let start = Instant::now();

    validate_spec(spec)?;

    let objective = VolatilityObjective::new(spec);
    let f_low = objective.evaluate(spec.sigma_low);
    let f_high = objective.evaluate(spec.sigma_high);
    trace!(
        "bracket [{}, {}]: f_low={:.6e}, f_high={:.6e}",
        spec.sigma_low, spec.sigma_high, f_low, f_high
    );

    if f_low * f_high > 0.0 {
        return Err(IVError::InvalidBracket {
            sigma_low: spec.sigma_low,
            sigma_high: spec.sigma_high,
            f_low,
            f_high,
        });
    }

    let config = BrentConfig::new()
        .with_tolerance(spec.tolerance)
        .with_machine_epsilon(MACHINE_EPSILON)
        .with_max_iterations(spec.max_iterations);

    let estimate = find_root(objective.as_fn(), spec.sigma_low, spec.sigma_high, &config)
        .map_err(|error| match error {
            RootFindingError::NotBracketed { a, b, fa, fb } => IVError::InvalidBracket {
                sigma_low: a,
                sigma_high: b,
                f_low: fa,
                f_high: fb,
            },
            RootFindingError::InvalidInterval { message } => IVError::InvalidInput { message },
        })?;

    let implied_volatility = estimate.root;
    let final_error = objective.evaluate(implied_volatility).abs();
    let calculated_price = objective.price(implied_volatility);
    let converged = final_error < spec.tolerance;

    let failure = if converged {
        None
    } else if estimate.reached_tolerance {
        Some(IVError::ToleranceNotReached {
            final_error,
            tolerance: spec.tolerance,
        })
    } else {
        Some(IVError::IterationCapReached {
            iterations: estimate.iterations,
            last_iv: implied_volatility,
        })
    };

    let result = VolatilityResult {
        implied_volatility,
        iterations: estimate.iterations,
        converged,
        final_error,
        calculated_price,
        price_difference: (calculated_price - spec.market_price).abs(),
        elapsed_ms: elapsed_ms(start),
        failure,
    };

    debug!(
        "{} K={:.2}: iv={:.6} after {} iterations, error={:.2e}, vega={:.4}, converged={}",
        spec.option_type,
        spec.strike,
        result.implied_volatility,
        result.iterations,
        result.final_error,
        BlackScholes::vega(spec, implied_volatility),
        result.converged
    );

    Ok(result)
}

/// Solves for implied volatility, never failing.
///
/// Every failure path returns the zeroed [`VolatilityResult`] with
/// `converged == false` and the reason in `failure`, so one bad record never
/// stops a batch.
///
/// # Example
/// ```
/// use numerics_rs::implied_volatility::{BlackScholes, OptionSpec, solve_iv};
///
/// let spec = OptionSpec::put(100.0, 105.0, 0.5, 0.02, 0.0);
/// let market_price = BlackScholes::price(&spec, 0.35);
/// let result = solve_iv(&spec.with_market_price(market_price));
/// assert!((result.implied_volatility - 0.35).abs() < 1e-4);
/// assert!(result.final_error < 1e-6);
/// ```
#[must_use]
pub fn solve_iv(spec: &OptionSpec) -> VolatilityResult {
    let start = Instant::now();
    match try_solve_iv(spec) {
        Ok(result) => {
            if let Some(reason) = &result.failure {
                warn!("{} K={:.2}: {}", spec.option_type, spec.strike, reason);
            }
            result
        }
        Err(error) => {
            warn!("{} K={:.2}: {}", spec.option_type, spec.strike, error);
            VolatilityResult::failed(error, elapsed_ms(start))
        }
    }
}
