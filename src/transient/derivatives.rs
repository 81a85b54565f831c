//! State derivatives of the diode circuits.
//!
//! Both topologies share one state type. The RC circuit only uses the
//! capacitor voltage and leaves the inductor current at zero.

use super::circuit::{CircuitSpec, DiodeParams, Topology};
use super::diode::{diode_voltage, resolve_current};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Integrated circuit state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitState {
    /// Capacitor voltage in volts.
    pub v: f64,
    /// Inductor current in amperes (always 0 for RC).
    pub i_l: f64,
}

impl CircuitState {
    /// Creates a state.
    #[must_use]
    pub fn new(v: f64, i_l: f64) -> Self {
        Self { v, i_l }
    }
}

impl Add for CircuitState {
    type Output = CircuitState;

    fn add(self, rhs: CircuitState) -> CircuitState {
        CircuitState::new(self.v + rhs.v, self.i_l + rhs.i_l)
    }
}

impl Mul<f64> for CircuitState {
    type Output = CircuitState;

    fn mul(self, rhs: f64) -> CircuitState {
        CircuitState::new(self.v * rhs, self.i_l * rhs)
    }
}

/// Observable quantities at one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observables {
    /// Voltage across the diode.
    pub v_diode: f64,
    /// Series current.
    pub i_circuit: f64,
    /// Inductor current (0 for RC).
    pub i_inductor: f64,
}

/// A circuit whose state can be advanced by an ODE integrator.
pub trait CircuitModel: Send + Sync {
    /// Time derivative of `state` at time `t`.
    fn derivative(&self, t: f64, state: &CircuitState) -> CircuitState;

    /// Projects a state back onto its physical bounds after a step.
    fn clamp(&self, state: CircuitState) -> CircuitState;

    /// Diode voltage and currents at `state`, as recorded in samples.
    fn observe(&self, state: &CircuitState) -> Observables;
}

/// Series source, resistor, diode and capacitor.
#[derive(Debug, Clone, Copy)]
pub struct RcDiode {
    resistance: f64,
    capacitance: f64,
    source_voltage: f64,
    diode: DiodeParams,
}

impl RcDiode {
    /// Creates the model.
    #[must_use]
    pub fn new(resistance: f64, capacitance: f64, source_voltage: f64, diode: DiodeParams) -> Self {
        Self {
            resistance,
            capacitance,
            source_voltage,
            diode,
        }
    }

    fn current(&self, v_cap: f64) -> f64 {
        resolve_current(v_cap, self.source_voltage, self.resistance, &self.diode)
    }
}

impl CircuitModel for RcDiode {
    /// dV/dt = I(V) / C, with I resolved through the diode.
    fn derivative(&self, _t: f64, state: &CircuitState) -> CircuitState {
        CircuitState::new(self.current(state.v) / self.capacitance, 0.0)
    }

    /// V ∈ [0, V_source].
    fn clamp(&self, state: CircuitState) -> CircuitState {
        CircuitState::new(state.v.max(0.0).min(self.source_voltage), 0.0)
    }

    fn observe(&self, state: &CircuitState) -> Observables {
        let current = self.current(state.v);
        Observables {
            v_diode: diode_voltage(current, &self.diode),
            i_circuit: current,
            i_inductor: 0.0,
        }
    }
}

/// Series source, resistor, inductor, diode and capacitor.
#[derive(Debug, Clone, Copy)]
pub struct RlcDiode {
    resistance: f64,
    capacitance: f64,
    inductance: f64,
    source_voltage: f64,
    diode: DiodeParams,
}

impl RlcDiode {
    /// Creates the model.
    #[must_use]
    pub fn new(
        resistance: f64,
        capacitance: f64,
        inductance: f64,
        source_voltage: f64,
        diode: DiodeParams,
    ) -> Self {
        Self {
            resistance,
            capacitance,
            inductance,
            source_voltage,
            diode,
        }
    }
}

impl CircuitModel for RlcDiode {
    /// dV/dt = I_L / C and dI_L/dt = (V_source - V - V_d(I_L) - I_L·R) / L.
    ///
    /// The diode blocks reverse current: dI_L/dt is forced to 0 while I_L is
    /// negative, and when I_L sits exactly at 0 with a negative drive.
    ///
    /// The second condition matters after the current peak. Once the clamp
    /// pins I_L to 0, a rule that only checked `I_L < 0` would let each RK4
    /// stage see a small negative slope, so the capacitor would slowly leak
    /// charge back toward the source. Blocking at exactly 0 holds V at its
    /// peak value instead (see `test_rlc_blocks_reverse_current`).
    fn derivative(&self, _t: f64, state: &CircuitState) -> CircuitState {
        let v_diode = diode_voltage(state.i_l, &self.diode);
        let dv_dt = state.i_l / self.capacitance;
        let mut di_dt = (self.source_voltage - state.v - v_diode - state.i_l * self.resistance)
            / self.inductance;

        if state.i_l < 0.0 || (state.i_l == 0.0 && di_dt < 0.0) {
            di_dt = 0.0;
        }

        CircuitState::new(dv_dt, di_dt)
    }

    /// V ≥ 0 and I_L ≥ 0.
    fn clamp(&self, state: CircuitState) -> CircuitState {
        CircuitState::new(state.v.max(0.0), state.i_l.max(0.0))
    }

    fn observe(&self, state: &CircuitState) -> Observables {
        Observables {
            v_diode: diode_voltage(state.i_l, &self.diode),
            i_circuit: state.i_l,
            i_inductor: state.i_l,
        }
    }
}

/// Builds the model for `spec` together with its initial state.
#[must_use]
pub fn model_for(spec: &CircuitSpec) -> (Box<dyn CircuitModel>, CircuitState) {
    match spec.topology {
        Topology::Rc => (
            Box::new(RcDiode::new(
                spec.resistance,
                spec.capacitance,
                spec.source_voltage,
                spec.diode,
            )),
            CircuitState::new(spec.initial_voltage, 0.0),
        ),
        Topology::Rlc {
            inductance,
            initial_current,
        } => (
            Box::new(RlcDiode::new(
                spec.resistance,
                spec.capacitance,
                inductance,
                spec.source_voltage,
                spec.diode,
            )),
            CircuitState::new(spec.initial_voltage, initial_current),
        ),
    }
}
