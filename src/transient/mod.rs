//! Transient simulation of diode-loaded RC and RLC circuits.
//!
//! # Circuits
//!
//! A DC source drives a series resistor, a Shockley diode and a capacitor.
//! The RLC variant adds a series inductor, which makes the capacitor voltage
//! overshoot the source before the diode blocks the reverse swing.
//!
//! The diode current in the RC circuit is implicit in the capacitor voltage
//! and is resolved by a short fixed-point iteration at every derivative
//! evaluation. The RLC circuit integrates the inductor current directly.
//!
//! # Integration
//!
//! [`simulate`] marches a fixed-step classical RK4 from `t_start` to `t_end`,
//! recording a [`TrajectorySample`] every `output_interval`. States are
//! clamped to their physical bounds after every step. The number of samples
//! is capped by [`SimulationConfig::max_samples`]; a run that hits the cap is
//! returned with [`Trajectory::is_truncated`] set.
//!
//! # Example
//!
//! ```
//! use numerics_rs::transient::{CircuitSpec, DiodeParams, SimulationConfig, simulate};
//!
//! let spec = CircuitSpec::rc(1000.0, 1e-6, 5.0, DiodeParams::default(), 0.0);
//! let trajectory = simulate(&spec, &SimulationConfig::default()).unwrap();
//! assert_eq!(trajectory.len(), spec.expected_samples());
//! ```

mod circuit;
mod derivatives;
mod diode;
mod error;
mod package;
mod rk4;
mod trajectory;

pub use circuit::{CircuitKind, CircuitSpec, DiodeParams, THERMAL_VOLTAGE_300K, Topology};
pub use derivatives::{CircuitModel, CircuitState, Observables, RcDiode, RlcDiode, model_for};
pub use diode::{
    DIODE_MAX_ITERATIONS, DIODE_RATIO_FLOOR, DIODE_TOLERANCE, DiodeSolve, diode_voltage,
    resolve_current, resolve_current_detailed,
};
pub use error::CircuitError;
pub use package::{TRAJECTORY_PACKAGE_FORMAT_VERSION, TrajectoryPackage, TrajectoryPayload};
pub use rk4::{MAX_TIME_STEPS, SimulationConfig, rk4_step, simulate};
pub use trajectory::{Trajectory, TrajectorySample};
