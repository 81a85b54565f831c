//! Sampled output of a transient run.

use super::derivatives::CircuitState;
use serde::{Deserialize, Serialize};

/// One recorded output point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Simulation time in seconds.
    pub time: f64,
    /// Capacitor voltage in volts.
    pub v_capacitor: f64,
    /// Diode voltage in volts.
    pub v_diode: f64,
    /// Series current in amperes.
    pub i_circuit: f64,
    /// Inductor current in amperes (0 for RC).
    pub i_inductor: f64,
    /// Integration steps taken before this sample.
    pub step_count: usize,
    /// Wall-clock time since the run started, in milliseconds.
    pub elapsed_ms: f64,
}

/// Time-ordered samples plus run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
    steps: usize,
    truncated: bool,
    final_state: CircuitState,
}

impl Trajectory {
    pub(crate) fn new(
        samples: Vec<TrajectorySample>,
        steps: usize,
        truncated: bool,
        final_state: CircuitState,
    ) -> Self {
        Self {
            samples,
            steps,
            truncated,
            final_state,
        }
    }

    /// Number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recorded samples in time order.
    #[must_use]
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Last recorded sample.
    #[must_use]
    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    /// State after the last integration step.
    #[must_use]
    pub fn final_state(&self) -> CircuitState {
        self.final_state
    }

    /// Total integration steps taken.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// True when the sample cap stopped the run before `t_end`.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Consumes the trajectory, returning its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<TrajectorySample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
