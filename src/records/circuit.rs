//! Circuit rows for transient batches.
//!
//! The two circuit kinds have separate column layouts:
//!
//! - RC: `rc_diode,R,C,V_source,I_s,n,V_t,V0,t_start,t_end,step_size,output_interval`
//! - RLC: `rlc_diode,R,C,L,V_source,I_s,n,V_t,V0,t_start,t_end,step_size,output_interval[,I0]`
//!
//! The trailing RLC initial current is optional and defaults to 0.

use super::{
    CsvRecord, ParsedRecords, RecordError, expect_fields, format_exp, parse_number, read_rows,
};
use crate::transient::{CircuitKind, CircuitSpec, DiodeParams, Trajectory, TrajectorySample};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Maximum number of circuit rows read from one input.
pub const MAX_CIRCUITS: usize = 50;

/// First column name of the circuit input and output headers.
pub const CIRCUIT_HEADER_TAG: &str = "circuit_type";

const RC_FIELDS: usize = 12;
const RLC_FIELDS: usize = 13;

/// One parsed circuit row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitInputRecord {
    /// 1-based source line.
    pub line: usize,
    /// Parsed circuit and time grid.
    pub spec: CircuitSpec,
}

impl CircuitInputRecord {
    /// Parses one trimmed row.
    pub fn parse(line: usize, row: &StringRecord) -> Result<Self, RecordError> {
        let tag = row.get(0).unwrap_or_default();
        let kind: CircuitKind = tag
            .parse()
            .map_err(|_| RecordError::new(line, format!("unknown circuit type '{tag}'")))?;

        let spec = match kind {
            CircuitKind::Rc => {
                expect_fields(row, RC_FIELDS, RC_FIELDS, line)?;
                let number = |index, name| parse_number(row, index, name, line);
                let diode =
                    DiodeParams::new(number(4, "I_s")?, number(5, "n")?, number(6, "V_t")?);
                CircuitSpec::rc(
                    number(1, "R")?,
                    number(2, "C")?,
                    number(3, "V_source")?,
                    diode,
                    number(7, "V0")?,
                )
                .with_time_span(number(8, "t_start")?, number(9, "t_end")?)
                .with_step_size(number(10, "step_size")?)
                .with_output_interval(number(11, "output_interval")?)
            }
            CircuitKind::Rlc => {
                expect_fields(row, RLC_FIELDS, RLC_FIELDS + 1, line)?;
                let number = |index, name| parse_number(row, index, name, line);
                let diode =
                    DiodeParams::new(number(5, "I_s")?, number(6, "n")?, number(7, "V_t")?);
                let initial_current = if row.len() > RLC_FIELDS {
                    number(13, "I0")?
                } else {
                    0.0
                };
                CircuitSpec::rlc(
                    number(1, "R")?,
                    number(2, "C")?,
                    number(3, "L")?,
                    number(4, "V_source")?,
                    diode,
                    number(8, "V0")?,
                    initial_current,
                )
                .with_time_span(number(9, "t_start")?, number(10, "t_end")?)
                .with_step_size(number(11, "step_size")?)
                .with_output_interval(number(12, "output_interval")?)
            }
        };

        Ok(Self { line, spec })
    }

    /// The circuit to simulate.
    #[must_use]
    pub fn into_spec(self) -> CircuitSpec {
        self.spec
    }
}

/// Reads every circuit row of `text`, up to [`MAX_CIRCUITS`].
pub fn parse_circuits(text: &str) -> ParsedRecords<CircuitInputRecord> {
    read_rows(text, CIRCUIT_HEADER_TAG, MAX_CIRCUITS, CircuitInputRecord::parse)
}

/// One sample row of a simulated circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitOutputRecord {
    /// Circuit kind.
    pub kind: CircuitKind,
    /// Resistance R.
    pub resistance: f64,
    /// Capacitance C.
    pub capacitance: f64,
    /// Inductance L, 0 for RC.
    pub inductance: f64,
    /// Source voltage.
    pub source_voltage: f64,
    /// Diode parameters.
    pub diode: DiodeParams,
    /// Initial capacitor voltage V0.
    pub initial_voltage: f64,
    /// Initial inductor current I0, 0 for RC.
    pub initial_current: f64,
    /// Recorded sample.
    pub sample: TrajectorySample,
}

impl CircuitOutputRecord {
    /// Combines a circuit with one of its samples.
    #[must_use]
    pub fn new(spec: &CircuitSpec, sample: &TrajectorySample) -> Self {
        Self {
            kind: spec.kind(),
            resistance: spec.resistance,
            capacitance: spec.capacitance,
            inductance: spec.inductance(),
            source_voltage: spec.source_voltage,
            diode: spec.diode,
            initial_voltage: spec.initial_voltage,
            initial_current: spec.initial_current(),
            sample: *sample,
        }
    }
}

/// One output row per sample of `trajectory`.
#[must_use]
pub fn circuit_output_rows(
    spec: &CircuitSpec,
    trajectory: &Trajectory,
) -> Vec<CircuitOutputRecord> {
    trajectory
        .samples()
        .iter()
        .map(|sample| CircuitOutputRecord::new(spec, sample))
        .collect()
}

impl CsvRecord for CircuitOutputRecord {
    fn csv_header() -> &'static [&'static str] {
        &[
            "circuit_type",
            "R",
            "C",
            "L",
            "V_source",
            "I_s",
            "n",
            "V_t",
            "V0",
            "I0",
            "time",
            "V_capacitor",
            "V_diode",
            "I_circuit",
            "I_inductor",
            "step_count",
            "execution_time_ms",
        ]
    }

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.kind.tag().to_string(),
            format!("{:.1}", self.resistance),
            format_exp(self.capacitance, 2),
            format_exp(self.inductance, 2),
            format!("{:.2}", self.source_voltage),
            format_exp(self.diode.saturation_current, 2),
            format!("{:.2}", self.diode.ideality),
            format!("{:.5}", self.diode.thermal_voltage),
            format!("{:.3}", self.initial_voltage),
            format!("{:.3}", self.initial_current),
            format_exp(self.sample.time, 6),
            format!("{:.6}", self.sample.v_capacitor),
            format!("{:.6}", self.sample.v_diode),
            format_exp(self.sample.i_circuit, 6),
            format_exp(self.sample.i_inductor, 6),
            self.sample.step_count.to_string(),
            format!("{:.3}", self.sample.elapsed_ms),
        ]
    }
}
