//! Price error as a function of volatility.

use super::black_scholes::BlackScholes;
use super::types::OptionSpec;

/// Signed Black-Scholes pricing error for one option spec.
///
/// Holds its own copy of the [`OptionSpec`].
#[derive(Debug, Clone, Copy)]
pub struct VolatilityObjective {
    spec: OptionSpec,
}

impl VolatilityObjective {
    /// Binds an objective to `spec`.
    #[must_use]
    pub fn new(spec: &OptionSpec) -> Self {
        Self { spec: *spec }
    }

    /// The bound spec.
    #[must_use]
    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    /// Model price at volatility `sigma`.
    #[inline]
    #[must_use]
    pub fn price(&self, sigma: f64) -> f64 {
        BlackScholes::price(&self.spec, sigma)
    }

    /// `price(σ) - market_price`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, sigma: f64) -> f64 {
        self.price(sigma) - self.spec.market_price
    }

    /// Borrows the objective as a plain closure for the root finder.
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |sigma| self.evaluate(sigma)
    }
}
