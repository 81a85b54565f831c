use numerics_rs::transient::{
    CircuitError, CircuitKind, CircuitSpec, DiodeParams, SimulationConfig, TrajectoryPackage,
    diode_voltage, simulate,
};

fn rc_spec(step_size: f64) -> CircuitSpec {
    CircuitSpec::rc(1000.0, 1e-6, 5.0, DiodeParams::default(), 0.0)
        .with_time_span(0.0, 5e-3)
        .with_step_size(step_size)
        .with_output_interval(1e-4)
}

fn rlc_spec() -> CircuitSpec {
    CircuitSpec::rlc(10.0, 1e-6, 1e-3, 5.0, DiodeParams::default(), 0.0, 0.0)
        .with_time_span(0.0, 2e-3)
        .with_step_size(1e-7)
        .with_output_interval(1e-5)
}

#[test]
fn test_rc_charges_monotonically_below_source() {
    let trajectory = simulate(&rc_spec(1e-6), &SimulationConfig::default()).unwrap();
    let samples = trajectory.samples();

    for pair in samples.windows(2) {
        assert!(pair[1].v_capacitor >= pair[0].v_capacitor);
    }
    for sample in samples {
        assert!(sample.v_capacitor >= 0.0 && sample.v_capacitor <= 5.0);
        assert!(sample.i_circuit >= 0.0);
        assert_eq!(sample.i_inductor, 0.0);
    }

    let last = trajectory.last().unwrap();
    assert!(last.v_capacitor > 0.9 * 5.0);
}

#[test]
fn test_rc_loop_voltages_balance() {
    let trajectory = simulate(&rc_spec(1e-6), &SimulationConfig::default()).unwrap();
    let last = trajectory.last().unwrap();
    let resistor_drop = last.i_circuit * 1000.0;
    let total = last.v_capacitor + last.v_diode + resistor_drop;
    assert!((total - 5.0).abs() < 1e-3, "loop sums to {total}");
    assert!((last.v_capacitor + last.v_diode - 5.0).abs() < 0.03 * 5.0);
}

#[test]
fn test_sample_count_independent_of_step() {
    let expected = rc_spec(1e-6).expected_samples();
    assert_eq!(expected, 51);
    for step in [1e-6, 5e-6, 1e-5, 2e-5] {
        let trajectory = simulate(&rc_spec(step), &SimulationConfig::default()).unwrap();
        assert!(
            trajectory.len().abs_diff(expected) <= 1,
            "step {step}: {} samples",
            trajectory.len()
        );
    }
}

#[test]
fn test_rlc_inductor_current_never_negative() {
    let trajectory = simulate(&rlc_spec(), &SimulationConfig::default()).unwrap();
    assert!(trajectory.samples().iter().all(|s| s.i_inductor >= 0.0));
    assert!(trajectory.samples().iter().all(|s| s.v_capacitor >= 0.0));
    assert!(trajectory.samples().iter().all(|s| s.i_circuit == s.i_inductor));
}

#[test]
fn test_rlc_overshoots_then_diode_blocks() {
    let trajectory = simulate(&rlc_spec(), &SimulationConfig::default()).unwrap();
    assert_eq!(trajectory.len(), 201);

    let peak = trajectory
        .samples()
        .iter()
        .map(|s| s.v_capacitor)
        .fold(f64::MIN, f64::max);
    assert!(peak > 5.0, "peak {peak}");

    // Once the current is blocked the capacitor holds its charge.
    let final_state = trajectory.final_state();
    assert_eq!(final_state.i_l, 0.0);
    let last = trajectory.last().unwrap();
    assert!((last.v_capacitor - peak).abs() < 1e-9);
    assert_eq!(last.v_diode, diode_voltage(0.0, &DiodeParams::default()));
}

#[test]
fn test_rlc_capacitor_does_not_leak_after_peak() {
    let trajectory = simulate(&rlc_spec(), &SimulationConfig::default()).unwrap();
    let samples = trajectory.samples();
    let blocked = samples
        .iter()
        .position(|s| s.i_inductor == 0.0 && s.v_capacitor > 5.0)
        .unwrap();
    assert!(blocked + 1 < samples.len());

    let held = samples[blocked].v_capacitor;
    for sample in &samples[blocked..] {
        assert_eq!(sample.i_inductor, 0.0);
        assert_eq!(sample.v_capacitor, held);
    }
}

#[test]
fn test_rlc_initial_current_is_recorded() {
    let spec = CircuitSpec::rlc(10.0, 1e-6, 1e-3, 5.0, DiodeParams::default(), 0.0, 0.05)
        .with_time_span(0.0, 2e-3)
        .with_step_size(1e-7)
        .with_output_interval(1e-5);
    let trajectory = simulate(&spec, &SimulationConfig::default()).unwrap();
    let first = trajectory.samples()[0];
    assert_eq!(first.i_inductor, 0.05);
    assert!(first.v_diode > 0.0);
    assert_eq!(spec.kind(), CircuitKind::Rlc);
}

#[test]
fn test_sample_cap_truncates_without_error() {
    let config = SimulationConfig::new().with_max_samples(25);
    let trajectory = simulate(&rlc_spec(), &config).unwrap();
    assert_eq!(trajectory.len(), 25);
    assert!(trajectory.is_truncated());
    assert!(trajectory.last().unwrap().time < 2e-3);
}

#[test]
fn test_unbounded_horizon_truncates_at_cap() {
    let spec = CircuitSpec::rc(1000.0, 1.0, 5.0, DiodeParams::default(), 0.0)
        .with_time_span(0.0, 1e20)
        .with_step_size(0.1)
        .with_output_interval(1.0);
    assert_eq!(spec.expected_samples(), usize::MAX);

    let trajectory = simulate(&spec, &SimulationConfig::new().with_max_samples(4)).unwrap();
    assert_eq!(trajectory.len(), 4);
    assert!(trajectory.is_truncated());
    let times: Vec<f64> = trajectory.samples().iter().map(|s| s.time).collect();
    for pair in times.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert!(trajectory.samples().iter().all(|s| s.v_capacitor <= 5.0));
}

#[test]
fn test_invalid_circuit_rejected() {
    let spec = rlc_spec().with_output_interval(0.0);
    assert!(matches!(
        simulate(&spec, &SimulationConfig::default()),
        Err(CircuitError::InvalidParameter { .. })
    ));

    let reversed = CircuitSpec::rc(1000.0, 1e-6, -5.0, DiodeParams::default(), 0.0);
    assert!(matches!(
        simulate(&reversed, &SimulationConfig::default()),
        Err(CircuitError::InvalidParameter { .. })
    ));
}

#[test]
fn test_package_round_trip_through_json() {
    let spec = rc_spec(1e-5);
    let trajectory = simulate(&spec, &SimulationConfig::default()).unwrap();
    let package = TrajectoryPackage::new(spec, trajectory.clone()).unwrap();

    let json = package.to_json().unwrap();
    let restored = TrajectoryPackage::from_json(&json).unwrap();
    assert_eq!(restored.into_trajectory().unwrap(), trajectory);

    let tampered = json.replacen("\"resistance\":1000.0", "\"resistance\":999.0", 1);
    assert_ne!(tampered, json);
    let err = TrajectoryPackage::from_json(&tampered)
        .unwrap()
        .validate()
        .unwrap_err();
    assert!(matches!(err, CircuitError::ChecksumMismatch { .. }));
}
