//! Circuit descriptions for transient simulation.

use super::error::CircuitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Thermal voltage kT/q at roughly 300 K, in volts.
pub const THERMAL_VOLTAGE_300K: f64 = 0.02585;

/// Circuit topology tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircuitKind {
    /// Source, resistor, diode and capacitor in series.
    Rc,
    /// Source, resistor, inductor, diode and capacitor in series.
    Rlc,
}

impl CircuitKind {
    /// Record tag used in tabular input and output files.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            CircuitKind::Rc => "rc_diode",
            CircuitKind::Rlc => "rlc_diode",
        }
    }
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CircuitKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rc_diode" => Ok(CircuitKind::Rc),
            "rlc_diode" => Ok(CircuitKind::Rlc),
            other => Err(CircuitError::InvalidParameter {
                message: format!("unknown circuit type tag '{other}'"),
            }),
        }
    }
}

/// Shockley diode parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiodeParams {
    /// Reverse saturation current I_s in amperes.
    pub saturation_current: f64,
    /// Ideality factor n.
    pub ideality: f64,
    /// Thermal voltage V_t in volts.
    pub thermal_voltage: f64,
}

impl DiodeParams {
    /// Creates diode parameters.
    #[must_use]
    pub fn new(saturation_current: f64, ideality: f64, thermal_voltage: f64) -> Self {
        Self {
            saturation_current,
            ideality,
            thermal_voltage,
        }
    }
}

impl Default for DiodeParams {
    fn default() -> Self {
        Self::new(1e-9, 1.0, THERMAL_VOLTAGE_300K)
    }
}

/// Variant-specific part of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Topology {
    /// One state: capacitor voltage.
    Rc,
    /// Two states: capacitor voltage and inductor current.
    Rlc {
        /// Inductance L in henries.
        inductance: f64,
        /// Initial inductor current I0 in amperes.
        initial_current: f64,
    },
}

/// Full description of one circuit simulation.
///
/// Field names follow the physical quantities: R, C, V_source, the diode,
/// the initial capacitor voltage V0, and the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitSpec {
    /// Series resistance R in ohms.
    pub resistance: f64,
    /// Capacitance C in farads.
    pub capacitance: f64,
    /// DC source voltage in volts.
    pub source_voltage: f64,
    /// Series diode.
    pub diode: DiodeParams,
    /// Initial capacitor voltage V0 in volts.
    pub initial_voltage: f64,
    /// Simulation start time in seconds.
    pub t_start: f64,
    /// Simulation end time in seconds.
    pub t_end: f64,
    /// Fixed RK4 step h in seconds.
    pub step_size: f64,
    /// Spacing of recorded samples in seconds.
    pub output_interval: f64,
    /// RC or RLC specific fields.
    pub topology: Topology,
}

impl CircuitSpec {
    /// RC circuit over five time constants, sampled every τ/10 with step τ/1000.
    #[must_use]
    pub fn rc(
        resistance: f64,
        capacitance: f64,
        source_voltage: f64,
        diode: DiodeParams,
        initial_voltage: f64,
    ) -> Self {
        let tau = resistance * capacitance;
        Self {
            resistance,
            capacitance,
            source_voltage,
            diode,
            initial_voltage,
            t_start: 0.0,
            t_end: 5.0 * tau,
            step_size: tau / 1000.0,
            output_interval: tau / 10.0,
            topology: Topology::Rc,
        }
    }

    /// RLC circuit with the same default time grid as [`CircuitSpec::rc`].
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn rlc(
        resistance: f64,
        capacitance: f64,
        inductance: f64,
        source_voltage: f64,
        diode: DiodeParams,
        initial_voltage: f64,
        initial_current: f64,
    ) -> Self {
        Self {
            topology: Topology::Rlc {
                inductance,
                initial_current,
            },
            ..Self::rc(
                resistance,
                capacitance,
                source_voltage,
                diode,
                initial_voltage,
            )
        }
    }

    /// Sets the simulated time span.
    #[must_use]
    pub fn with_time_span(mut self, t_start: f64, t_end: f64) -> Self {
        self.t_start = t_start;
        self.t_end = t_end;
        self
    }

    /// Sets the integration step.
    #[must_use]
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Sets the sample spacing.
    #[must_use]
    pub fn with_output_interval(mut self, output_interval: f64) -> Self {
        self.output_interval = output_interval;
        self
    }

    /// Topology tag.
    #[must_use]
    pub fn kind(&self) -> CircuitKind {
        match self.topology {
            Topology::Rc => CircuitKind::Rc,
            Topology::Rlc { .. } => CircuitKind::Rlc,
        }
    }

    /// Inductance, or 0 for an RC circuit.
    #[must_use]
    pub fn inductance(&self) -> f64 {
        match self.topology {
            Topology::Rc => 0.0,
            Topology::Rlc { inductance, .. } => inductance,
        }
    }

    /// Initial inductor current, or 0 for an RC circuit.
    #[must_use]
    pub fn initial_current(&self) -> f64 {
        match self.topology {
            Topology::Rc => 0.0,
            Topology::Rlc {
                initial_current, ..
            } => initial_current,
        }
    }

    /// RC time constant τ = R·C in seconds.
    #[must_use]
    pub fn time_constant(&self) -> f64 {
        self.resistance * self.capacitance
    }

    /// Number of samples a full run records: `floor((t_end - t_start) / interval) + 1`.
    ///
    /// Saturates at `usize::MAX` for spans too long to count.
    #[must_use]
    pub fn expected_samples(&self) -> usize {
        let span = (self.t_end - self.t_start).max(0.0);
        let intervals = (span / self.output_interval).floor();
        (intervals as usize).saturating_add(1)
    }

    /// Checks that every parameter is usable.
    ///
    /// # Returns
    /// - `Ok(())` if the circuit can be simulated
    /// - `Err(CircuitError::InvalidParameter)` naming the first bad field
    pub fn validate(&self) -> Result<(), CircuitError> {
        let finite = [
            ("R", self.resistance),
            ("C", self.capacitance),
            ("L", self.inductance()),
            ("V_source", self.source_voltage),
            ("I_s", self.diode.saturation_current),
            ("n", self.diode.ideality),
            ("V_t", self.diode.thermal_voltage),
            ("V0", self.initial_voltage),
            ("I0", self.initial_current()),
            ("t_start", self.t_start),
            ("t_end", self.t_end),
            ("step_size", self.step_size),
            ("output_interval", self.output_interval),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(CircuitError::InvalidParameter {
                message: format!("{name} must be finite, got {value}"),
            });
        }

        let mut positive = vec![
            ("R", self.resistance),
            ("C", self.capacitance),
            ("I_s", self.diode.saturation_current),
            ("n", self.diode.ideality),
            ("V_t", self.diode.thermal_voltage),
            ("step_size", self.step_size),
            ("output_interval", self.output_interval),
        ];
        if let Topology::Rlc { inductance, .. } = self.topology {
            positive.push(("L", inductance));
        }
        if let Some((name, value)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(CircuitError::InvalidParameter {
                message: format!("{name} must be positive, got {value}"),
            });
        }

        if self.source_voltage < 0.0 {
            return Err(CircuitError::InvalidParameter {
                message: format!(
                    "V_source must not be negative, got {}",
                    self.source_voltage
                ),
            });
        }

        if self.t_end < self.t_start {
            return Err(CircuitError::InvalidParameter {
                message: format!(
                    "t_end ({}) must not precede t_start ({})",
                    self.t_end, self.t_start
                ),
            });
        }

        Ok(())
    }
}
