//! Types for implied volatility inversion.

use super::error::IVError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default lower end of the volatility search bracket (0.1%).
pub const DEFAULT_SIGMA_LOW: f64 = 0.001;
/// Default upper end of the volatility search bracket (500%).
pub const DEFAULT_SIGMA_HIGH: f64 = 5.0;
/// Default absolute tolerance on the price error.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;
/// Default iteration budget for the root finder.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Option type for IV calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl OptionType {
    /// Record tag used in tabular input and output files.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            OptionType::Call => "option_call",
            OptionType::Put => "option_put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OptionType {
    type Err = IVError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "option_call" => Ok(OptionType::Call),
            "option_put" => Ok(OptionType::Put),
            other => Err(IVError::InvalidInput {
                message: format!("unknown option type tag '{other}'"),
            }),
        }
    }
}

/// Inputs for one implied volatility inversion.
///
/// Bundles the contract, the observed market price and the solver settings
/// (search bracket, tolerance, iteration budget). Consumed by value by the
/// objective, so every inversion works on its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option type (Call or Put).
    pub option_type: OptionType,
    /// Underlying spot price (S).
    pub spot: f64,
    /// Option strike price (K).
    pub strike: f64,
    /// Time to expiration in years (T).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.05 for 5%).
    pub risk_free_rate: f64,
    /// Observed market price to match.
    pub market_price: f64,
    /// Lower end of the volatility search bracket.
    pub sigma_low: f64,
    /// Upper end of the volatility search bracket.
    pub sigma_high: f64,
    /// Absolute tolerance on the price error.
    pub tolerance: f64,
    /// Iteration budget for the root finder.
    pub max_iterations: u32,
}

impl OptionSpec {
    /// Creates a new spec with default bracket, tolerance and iteration budget.
    ///
    /// # Arguments
    /// - `option_type`: Call or Put
    /// - `spot`: Underlying spot price
    /// - `strike`: Option strike price
    /// - `time_to_expiry`: Time to expiration in years
    /// - `risk_free_rate`: Risk-free interest rate (annualized)
    /// - `market_price`: Observed option price
    #[must_use]
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        market_price: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            market_price,
            sigma_low: DEFAULT_SIGMA_LOW,
            sigma_high: DEFAULT_SIGMA_HIGH,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Creates a spec for a call option.
    #[must_use]
    pub fn call(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        market_price: f64,
    ) -> Self {
        Self::new(
            OptionType::Call,
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            market_price,
        )
    }

    /// Creates a spec for a put option.
    #[must_use]
    pub fn put(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        market_price: f64,
    ) -> Self {
        Self::new(
            OptionType::Put,
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            market_price,
        )
    }

    /// Sets the volatility search bracket.
    #[must_use]
    pub fn with_bracket(mut self, sigma_low: f64, sigma_high: f64) -> Self {
        self.sigma_low = sigma_low;
        self.sigma_high = sigma_high;
        self
    }

    /// Sets the absolute price tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replaces the observed market price.
    #[must_use]
    pub fn with_market_price(mut self, market_price: f64) -> Self {
        self.market_price = market_price;
        self
    }

    /// Discount factor `e^(-rT)`.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// No-arbitrage lower bound on the option price.
    ///
    /// For calls: max(0, S - K·e^(-rT))
    /// For puts:  max(0, K·e^(-rT) - S)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        let discounted_strike = self.strike * self.discount_factor();
        match self.option_type {
            OptionType::Call => (self.spot - discounted_strike).max(0.0),
            OptionType::Put => (discounted_strike - self.spot).max(0.0),
        }
    }
}

/// Result of one implied volatility inversion.
///
/// Starts zeroed, is filled in by the solver and returned once. Failure paths
/// keep the zeroed values and record the reason in `failure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityResult {
    /// Recovered implied volatility (e.g., 0.25 = 25%).
    pub implied_volatility: f64,
    /// Root finder iterations spent.
    pub iterations: u32,
    /// True iff `final_error < tolerance`.
    pub converged: bool,
    /// `|f(σ*)|`, the absolute price error at the recovered volatility.
    pub final_error: f64,
    /// Black-Scholes price at the recovered volatility.
    pub calculated_price: f64,
    /// `|calculated_price - market_price|`.
    pub price_difference: f64,
    /// Wall-clock time spent on the inversion in milliseconds.
    pub elapsed_ms: f64,
    /// Why the inversion failed or stopped short, if it did.
    #[serde(skip)]
    pub failure: Option<IVError>,
}

impl VolatilityResult {
    /// Zeroed result. `final_error` starts at 1.0 so an untouched result can
    /// never read as converged.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            implied_volatility: 0.0,
            iterations: 0,
            converged: false,
            final_error: 1.0,
            calculated_price: 0.0,
            price_difference: 0.0,
            elapsed_ms: 0.0,
            failure: None,
        }
    }

    /// Zeroed result carrying a failure reason.
    #[must_use]
    pub fn failed(failure: IVError, elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms,
            failure: Some(failure),
            ..Self::empty()
        }
    }

    /// Returns the IV as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn iv_percent(&self) -> f64 {
        self.implied_volatility * 100.0
    }
}

impl Default for VolatilityResult {
    fn default() -> Self {
        Self::empty()
    }
}
