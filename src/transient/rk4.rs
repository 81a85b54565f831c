//! Fixed-step fourth-order Runge-Kutta time march.

use super::circuit::CircuitSpec;
use super::derivatives::{CircuitModel, CircuitState, model_for};
use super::error::CircuitError;
use super::trajectory::{Trajectory, TrajectorySample};
use crate::utils::elapsed_ms;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Default cap on recorded samples per run.
pub const MAX_TIME_STEPS: usize = 100_000;

/// Run-level settings that are not part of the circuit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Maximum number of samples a run may record.
    pub max_samples: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_samples: MAX_TIME_STEPS,
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration with the default sample cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sample cap.
    #[must_use]
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }
}

/// One classical RK4 step of size `h` from `(t, state)`.
#[inline]
pub fn rk4_step<M: CircuitModel + ?Sized>(
    model: &M,
    t: f64,
    state: CircuitState,
    h: f64,
) -> CircuitState {
    let half = 0.5 * h;
    let k1 = model.derivative(t, &state);
    let k2 = model.derivative(t + half, &(state + k1 * half));
    let k3 = model.derivative(t + half, &(state + k2 * half));
    let k4 = model.derivative(t + h, &(state + k3 * h));

    state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

/// Simulates `spec` and returns the sampled trajectory.
///
/// Samples are taken every `output_interval` starting at `t_start`, before
/// the step that leaves that time. After each step the state is clamped to
/// its physical bounds. Hitting the sample cap ends the run early and marks
/// the trajectory as truncated.
///
/// # Arguments
/// - `spec`: circuit and time grid
/// - `config`: sample cap
///
/// # Returns
/// - `Ok(Trajectory)` for a valid circuit, possibly truncated
/// - `Err(CircuitError::InvalidParameter)` if the circuit or config is unusable
pub fn simulate(spec: &CircuitSpec, config: &SimulationConfig) -> Result<Trajectory, CircuitError> {
    spec.validate()?;
    if config.max_samples == 0 {
        return Err(CircuitError::InvalidParameter {
            message: "max_samples must be positive".to_string(),
        });
    }

    let start = Instant::now();
    let (model, mut state) = model_for(spec);
    let h = spec.step_size;

    let mut samples = Vec::with_capacity(config.max_samples.min(spec.expected_samples()));
    let mut step_count = 0usize;
    let mut t = spec.t_start;
    let mut next_output = spec.t_start;

    while t <= spec.t_end && samples.len() < config.max_samples {
        if t >= next_output {
            let observed = model.observe(&state);
            samples.push(TrajectorySample {
                time: t,
                v_capacitor: state.v,
                v_diode: observed.v_diode,
                i_circuit: observed.i_circuit,
                i_inductor: observed.i_inductor,
                step_count,
                elapsed_ms: elapsed_ms(start),
            });
            next_output = spec.t_start + samples.len() as f64 * spec.output_interval;
            trace!("sample {} at t={:.6e}: {:?}", samples.len(), t, state);
        }

        state = model.clamp(rk4_step(model.as_ref(), t, state, h));
        step_count += 1;
        t = spec.t_start + step_count as f64 * h;
    }

    let truncated = t <= spec.t_end;
    if truncated {
        warn!(
            "{} run stopped at t={:.6e} of {:.6e}: sample buffer of {} exhausted",
            spec.kind(),
            t,
            spec.t_end,
            config.max_samples
        );
    }

    debug!(
        "{} run: {} samples, {} steps, final V={:.6}, I_L={:.6e}, {:.3} ms",
        spec.kind(),
        samples.len(),
        step_count,
        state.v,
        state.i_l,
        elapsed_ms(start)
    );

    Ok(Trajectory::new(samples, step_count, truncated, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transient::circuit::DiodeParams;

    /// dy/dt = -y, exact solution e^{-t}.
    struct Decay;

    impl CircuitModel for Decay {
        fn derivative(&self, _t: f64, state: &CircuitState) -> CircuitState {
            CircuitState::new(-state.v, -state.i_l)
        }

        fn clamp(&self, state: CircuitState) -> CircuitState {
            state
        }

        fn observe(&self, _state: &CircuitState) -> crate::transient::derivatives::Observables {
            crate::transient::derivatives::Observables {
                v_diode: 0.0,
                i_circuit: 0.0,
                i_inductor: 0.0,
            }
        }
    }

    fn rc_spec() -> CircuitSpec {
        CircuitSpec::rc(1000.0, 1e-6, 5.0, DiodeParams::default(), 0.0)
            .with_time_span(0.0, 5e-3)
            .with_step_size(1e-6)
            .with_output_interval(1e-4)
    }

    #[test]
    fn test_rk4_step_fourth_order_accuracy() {
        let mut state = CircuitState::new(1.0, 2.0);
        let h = 0.1;
        for i in 0..10 {
            state = rk4_step(&Decay, i as f64 * h, state, h);
        }
        let exact = (-1.0f64).exp();
        assert!((state.v - exact).abs() < 1e-6);
        assert!((state.i_l - 2.0 * exact).abs() < 2e-6);
    }

    #[test]
    fn test_default_config() {
        assert_eq!(SimulationConfig::new().max_samples, MAX_TIME_STEPS);
        assert_eq!(
            SimulationConfig::new().with_max_samples(10).max_samples,
            10
        );
    }

    #[test]
    fn test_rc_sample_schedule() {
        let traj = simulate(&rc_spec(), &SimulationConfig::default()).unwrap();
        assert_eq!(traj.len(), 51);
        assert!(!traj.is_truncated());
        assert_eq!(traj.steps(), 5001);

        let first = traj.samples()[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.step_count, 0);
        assert_eq!(first.v_capacitor, 0.0);

        for pair in traj.samples().windows(2) {
            assert!(pair[1].time > pair[0].time);
            assert!(pair[1].step_count > pair[0].step_count);
        }
    }

    #[test]
    fn test_rc_charges_toward_source() {
        let traj = simulate(&rc_spec(), &SimulationConfig::default()).unwrap();
        let last = traj.last().copied().unwrap();
        assert!(last.v_capacitor > 4.5 && last.v_capacitor <= 5.0);
        assert!(last.v_diode > 0.0);
        assert_eq!(last.i_inductor, 0.0);
        assert!(traj.final_state().v >= last.v_capacitor);
    }

    #[test]
    fn test_zero_span_records_single_sample() {
        let spec = rc_spec().with_time_span(0.0, 0.0);
        let traj = simulate(&spec, &SimulationConfig::default()).unwrap();
        assert_eq!(traj.len(), 1);
        assert_eq!(traj.steps(), 1);
        assert!(!traj.is_truncated());
    }

    #[test]
    fn test_truncation_sets_flag() {
        let traj = simulate(&rc_spec(), &SimulationConfig::new().with_max_samples(10)).unwrap();
        assert_eq!(traj.len(), 10);
        assert!(traj.is_truncated());
    }

    #[test]
    fn test_long_horizon_stops_at_sample_cap() {
        let spec = CircuitSpec::rlc(10.0, 1e-6, 1e-3, 5.0, DiodeParams::default(), 0.0, 0.0)
            .with_time_span(0.0, 1e20)
            .with_step_size(1e-6)
            .with_output_interval(1e-5);
        let traj = simulate(&spec, &SimulationConfig::new().with_max_samples(3)).unwrap();
        assert_eq!(traj.len(), 3);
        assert!(traj.is_truncated());
        assert!(traj.steps() < 100);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let bad = rc_spec().with_step_size(-1e-6);
        assert!(matches!(
            simulate(&bad, &SimulationConfig::default()),
            Err(CircuitError::InvalidParameter { .. })
        ));
        assert!(matches!(
            simulate(&rc_spec(), &SimulationConfig::new().with_max_samples(0)),
            Err(CircuitError::InvalidParameter { .. })
        ));
    }
}
