use numerics_rs::prelude::*;

#[test]
fn test_failures_do_not_stop_the_batch() {
    let good = OptionSpec::call(100.0, 100.0, 1.0, 0.05, 10.4506)
        .with_bracket(0.01, 3.0)
        .with_tolerance(1e-6);
    let specs = vec![
        good,
        OptionSpec::call(100.0, 90.0, 1.0, 0.05, 5.0),
        good.with_bracket(0.5, 1.0),
        good.with_max_iterations(0),
        good,
    ];

    let (results, summary) = solve_all(&specs);
    assert_eq!(
        summary,
        BatchSummary {
            total: 5,
            succeeded: 2,
            failed: 3
        }
    );
    assert!(matches!(results[1].failure, Some(IVError::BelowIntrinsic { .. })));
    assert!(matches!(results[2].failure, Some(IVError::InvalidBracket { .. })));
    assert!(matches!(results[3].failure, Some(IVError::InvalidInput { .. })));
    assert!(results[4].converged);
}

#[test]
fn test_parallel_circuits_keep_order() {
    let specs: Vec<CircuitSpec> = [1000.0, 2000.0, 500.0, 4000.0, 250.0]
        .iter()
        .map(|&r| CircuitSpec::rc(r, 1e-6, 5.0, DiodeParams::default(), 0.0))
        .collect();

    let (results, summary) = simulate_all_parallel(&specs, &SimulationConfig::default(), 2);
    assert_eq!(summary.succeeded, 5);
    for (spec, result) in specs.iter().zip(&results) {
        let trajectory = result.as_ref().unwrap();
        assert_eq!(trajectory.len(), spec.expected_samples());
        let last = trajectory.last().unwrap();
        assert!((last.time - spec.t_end).abs() < spec.step_size);
    }
}

#[test]
fn test_batch_config_defaults() {
    let config = BatchConfig::default();
    assert_eq!(config.workers, 1);
    assert_eq!(config.max_records, usize::MAX);
}
