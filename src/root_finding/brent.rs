//! Brent's method for bracketed root finding.
//!
//! Combines bisection with secant and inverse quadratic interpolation. An
//! interpolated step is only taken when it lands inside the current bracket
//! and shrinks faster than the step before last, otherwise the solver
//! bisects. The bracket therefore always shrinks and the method keeps the
//! guaranteed convergence of bisection while usually converging
//! superlinearly.

use super::error::RootFindingError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Double precision machine epsilon used by default for the relative part of
/// the termination tolerance.
pub const MACHINE_EPSILON: f64 = 2.22e-16;

/// Configuration for the Brent solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrentConfig {
    /// Absolute tolerance on both the interval half-width and `|f(b)|`.
    pub tolerance: f64,
    /// Relative precision of the arithmetic, scaled by `|b|`.
    pub machine_epsilon: f64,
    /// Maximum number of function evaluations after the two endpoints.
    pub max_iterations: u32,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            machine_epsilon: MACHINE_EPSILON,
            max_iterations: 100,
        }
    }
}

impl BrentConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the machine epsilon.
    #[must_use]
    pub fn with_machine_epsilon(mut self, machine_epsilon: f64) -> Self {
        self.machine_epsilon = machine_epsilon;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Best root estimate produced by [`find_root`].
///
/// Returned whether or not the tolerance was met. Callers that need a
/// convergence verdict should judge `value` against their own criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootEstimate {
    /// Best estimate of the root.
    pub root: f64,
    /// Function value at `root`.
    pub value: f64,
    /// Function evaluations spent after the two endpoint evaluations.
    pub iterations: u32,
    /// Final bracket `(low, high)` known to contain a sign change.
    pub bracket: (f64, f64),
    /// True when the solver stopped on a tolerance test rather than on the
    /// iteration cap.
    pub reached_tolerance: bool,
}

impl RootEstimate {
    /// Width of the final bracket.
    #[must_use]
    pub fn bracket_width(&self) -> f64 {
        self.bracket.1 - self.bracket.0
    }
}

/// Finds a root of `f` in `[a, b]` using Brent's method.
///
/// # Arguments
/// - `f`: Continuous scalar function
/// - `a`, `b`: Interval endpoints, in either order, with `f(a)·f(b) ≤ 0`
/// - `config`: Tolerance, machine epsilon and iteration cap
///
/// # Returns
/// - `Ok(RootEstimate)`: Best estimate, even if the iteration cap was hit
/// - `Err(RootFindingError::NotBracketed)`: If `f(a)` and `f(b)` share a sign
/// - `Err(RootFindingError::InvalidInterval)`: If an endpoint or an endpoint
///   value is not finite
///
/// # Example
/// ```
/// use numerics_rs::root_finding::{BrentConfig, find_root};
///
/// let estimate = find_root(|x| x * x - 2.0, 0.0, 2.0, &BrentConfig::default()).unwrap();
/// assert!((estimate.root - 2f64.sqrt()).abs() < 1e-8);
/// ```
pub fn find_root<F>(
    mut f: F,
    a: f64,
    b: f64,
    config: &BrentConfig,
) -> Result<RootEstimate, RootFindingError>
where
    F: FnMut(f64) -> f64,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(RootFindingError::InvalidInterval {
            message: format!("endpoints must be finite, got [{a}, {b}]"),
        });
    }

    let mut sa = a;
    let mut sb = b;
    let mut fa = f(sa);
    let mut fb = f(sb);

    if !fa.is_finite() || !fb.is_finite() {
        return Err(RootFindingError::InvalidInterval {
            message: format!("function not finite at endpoints: f({a})={fa}, f({b})={fb}"),
        });
    }

    if fa == 0.0 {
        return Ok(exact_root(sa, sb, sa));
    }
    if fb == 0.0 {
        return Ok(exact_root(sa, sb, sb));
    }
    if fa.signum() == fb.signum() {
        return Err(RootFindingError::NotBracketed { a, b, fa, fb });
    }

    let t = config.tolerance;
    let eps = config.machine_epsilon;

    // c is the contrapoint: f(c) always has the opposite sign to f(b).
    let mut c = sa;
    let mut fc = fa;
    let mut e = sb - sa;
    let mut d = e;
    let mut iterations: u32 = 0;

    loop {
        if fc.abs() < fb.abs() {
            sa = sb;
            sb = c;
            c = sa;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * eps * sb.abs() + t;
        let m = 0.5 * (c - sb);

        if m.abs() <= tol || fb == 0.0 || fb.abs() < t {
            return Ok(estimate(sb, fb, c, iterations, true));
        }

        if iterations >= config.max_iterations {
            trace!(
                "brent: iteration cap {} reached at b={:.12}, f(b)={:.3e}",
                config.max_iterations, sb, fb
            );
            return Ok(estimate(sb, fb, c, iterations, false));
        }

        if e.abs() < tol || fa.abs() <= fb.abs() {
            e = m;
            d = e;
        } else {
            let s = fb / fa;
            let mut p;
            let mut q;
            if sa == c {
                // Secant through a and b.
                p = 2.0 * m * s;
                q = 1.0 - s;
            } else {
                // Inverse quadratic interpolation through a, b and c.
                let qa = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * m * qa * (qa - r) - (sb - sa) * (r - 1.0));
                q = (qa - 1.0) * (r - 1.0) * (s - 1.0);
            }

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            let previous = e;
            e = d;

            if 2.0 * p < 3.0 * m * q - (tol * q).abs() && p < (0.5 * previous * q).abs() {
                d = p / q;
            } else {
                e = m;
                d = e;
            }
        }

        sa = sb;
        fa = fb;

        if tol < d.abs() {
            sb += d;
        } else if m > 0.0 {
            sb += tol;
        } else {
            sb -= tol;
        }

        fb = f(sb);
        iterations += 1;
        trace!("brent: iteration {} b={:.12} f(b)={:.3e}", iterations, sb, fb);

        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = sa;
            fc = fa;
            e = sb - sa;
            d = e;
        }
    }
}

fn exact_root(a: f64, b: f64, root: f64) -> RootEstimate {
    RootEstimate {
        root,
        value: 0.0,
        iterations: 0,
        bracket: (a.min(b), a.max(b)),
        reached_tolerance: true,
    }
}

fn estimate(b: f64, fb: f64, c: f64, iterations: u32, reached_tolerance: bool) -> RootEstimate {
    RootEstimate {
        root: b,
        value: fb,
        iterations,
        bracket: (b.min(c), b.max(c)),
        reached_tolerance,
    }
}
