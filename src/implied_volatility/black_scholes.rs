//! Black-Scholes pricing model.
//!
//! This module provides a lightweight closed-form implementation of the
//! Black-Scholes formula for European calls and puts, together with the
//! standard normal distribution helpers it needs.

use super::types::{OptionSpec, OptionType};
use std::f64::consts::PI;

/// Square root of 2, precomputed for efficiency.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Black-Scholes pricing model implementation.
pub struct BlackScholes;

impl BlackScholes {
    /// Approximation of the error function (erf).
    ///
    /// Uses Abramowitz and Stegun approximation (formula 7.1.26)
    /// with maximum error of 1.5×10⁻⁷. Evaluated on `|x|` and sign-restored,
    /// so `erf(-x) == -erf(x)` holds exactly.
    ///
    /// # Arguments
    /// - `x`: Input value
    ///
    /// # Returns
    /// Approximation of erf(x)
    #[must_use]
    pub fn erf(x: f64) -> f64 {
        const A1: f64 = 0.254829592;
        const A2: f64 = -0.284496736;
        const A3: f64 = 1.421413741;
        const A4: f64 = -1.453152027;
        const A5: f64 = 1.061405429;
        const P: f64 = 0.3275911;

        // The coefficients sum to 1 - 1e-9, so pin the origin exactly.
        if x == 0.0 {
            return 0.0;
        }

        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        let x = x.abs();

        let t = 1.0 / (1.0 + P * x);
        let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

        sign * y
    }

    /// Standard normal cumulative distribution function Φ(x).
    ///
    /// Continuous and non-decreasing on the whole real line, with
    /// `Φ(0) = 0.5` and `Φ(-x) = 1 - Φ(x)`.
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + Self::erf(x / SQRT_2))
    }

    /// Standard normal probability density function φ(x).
    #[must_use]
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Theoretical option price from raw inputs.
    ///
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// Returns 0 when `time <= 0` or `vol <= 0`. Those inputs show up
    /// transiently while a root finder explores a bracket, so they map to a
    /// sentinel instead of an error.
    ///
    /// # Arguments
    /// - `spot`: Current underlying price (S)
    /// - `strike`: Option strike price (K)
    /// - `time`: Time to expiration in years (T)
    /// - `rate`: Risk-free interest rate (r)
    /// - `vol`: Volatility (σ)
    /// - `option_type`: Call or Put
    #[must_use]
    pub fn option_price(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        vol: f64,
        option_type: OptionType,
    ) -> f64 {
        if time <= 0.0 || vol <= 0.0 {
            return 0.0;
        }

        let d1 = Self::d1(spot, strike, rate, time, vol);
        let d2 = Self::d2(d1, vol, time);
        let discount = (-rate * time).exp();

        match option_type {
            OptionType::Call => spot * Self::norm_cdf(d1) - strike * discount * Self::norm_cdf(d2),
            OptionType::Put => strike * discount * Self::norm_cdf(-d2) - spot * Self::norm_cdf(-d1),
        }
    }

    /// Theoretical price of the contract described by `spec` at volatility `vol`.
    #[must_use]
    pub fn price(spec: &OptionSpec, vol: f64) -> f64 {
        Self::option_price(
            spec.spot,
            spec.strike,
            spec.time_to_expiry,
            spec.risk_free_rate,
            vol,
            spec.option_type,
        )
    }

    /// Calculates vega (∂price/∂σ), identical for calls and puts.
    ///
    /// Vega = S · N'(d1) · √T
    #[must_use]
    pub fn vega(spec: &OptionSpec, vol: f64) -> f64 {
        if spec.time_to_expiry <= 0.0 || vol <= 0.0 {
            return 0.0;
        }

        let d1 = Self::d1(
            spec.spot,
            spec.strike,
            spec.risk_free_rate,
            spec.time_to_expiry,
            vol,
        );
        spec.spot * Self::norm_pdf(d1) * spec.time_to_expiry.sqrt()
    }
}
