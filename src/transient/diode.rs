//! Shockley diode model and the series-current fixed-point solve.

use super::circuit::DiodeParams;
use serde::{Deserialize, Serialize};

/// Floor on `I / I_s` before taking the logarithm.
pub const DIODE_RATIO_FLOOR: f64 = 1e-15;

/// Update budget of the series-current fixed-point iteration.
pub const DIODE_MAX_ITERATIONS: usize = 10;

/// Early-exit threshold on successive current updates, in amperes.
pub const DIODE_TOLERANCE: f64 = 1e-9;

/// Forward voltage across the diode carrying `current`.
///
/// `n·V_t·ln(I/I_s + 1)` for forward current, 0 when the diode is reverse
/// biased or not conducting.
#[inline]
#[must_use]
pub fn diode_voltage(current: f64, diode: &DiodeParams) -> f64 {
    if current <= 0.0 {
        return 0.0;
    }

    let ratio = (current / diode.saturation_current).max(DIODE_RATIO_FLOOR);
    diode.ideality * diode.thermal_voltage * (ratio + 1.0).ln()
}

/// Outcome of [`resolve_current_detailed`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiodeSolve {
    /// Best available series current, never negative.
    pub current: f64,
    /// Updates performed.
    pub iterations: usize,
    /// Size of the last update.
    pub last_update: f64,
}

/// Series current through R and the diode, charging a capacitor at `v_cap`.
///
/// Solves `I = (V_source - V_cap - V_d(I)) / R` by fixed-point iteration
/// starting from the diode-free guess `(V_source - V_cap) / R`. Every update
/// is clamped to `I >= 0`. Returns the best available current even when the
/// update budget runs out first.
#[inline]
#[must_use]
pub fn resolve_current(
    v_cap: f64,
    source_voltage: f64,
    resistance: f64,
    diode: &DiodeParams,
) -> f64 {
    resolve_current_detailed(v_cap, source_voltage, resistance, diode).current
}

/// [`resolve_current`] with iteration diagnostics.
#[must_use]
pub fn resolve_current_detailed(
    v_cap: f64,
    source_voltage: f64,
    resistance: f64,
    diode: &DiodeParams,
) -> DiodeSolve {
    let drive = source_voltage - v_cap;
    let mut current = drive / resistance;
    let mut last_update = f64::INFINITY;
    let mut iterations = 0;

    while iterations < DIODE_MAX_ITERATIONS {
        let next = ((drive - diode_voltage(current, diode)) / resistance).max(0.0);
        last_update = (next - current).abs();
        current = next;
        iterations += 1;

        if last_update < DIODE_TOLERANCE {
            break;
        }
    }

    DiodeSolve {
        current,
        iterations,
        last_update,
    }
}
