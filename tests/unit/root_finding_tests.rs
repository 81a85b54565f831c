use numerics_rs::root_finding::{BrentConfig, RootFindingError, find_root};

#[test]
fn test_idempotent_around_known_root() {
    let f = |x: f64| x.powi(3) - 2.0 * x - 5.0;
    let config = BrentConfig::new().with_tolerance(1e-12);
    let first = find_root(f, 2.0, 3.0, &config).unwrap();

    let delta = 1e-3;
    let second = find_root(f, first.root - delta, first.root + delta, &config).unwrap();
    assert!((second.root - first.root).abs() < 1e-10);
    assert!(second.value.abs() < 1e-9);
}

#[test]
fn test_bracket_always_contains_root() {
    let f = |x: f64| (x - 0.7).atan();
    for max_iterations in 1..12 {
        let config = BrentConfig::new()
            .with_tolerance(1e-15)
            .with_max_iterations(max_iterations);
        let estimate = find_root(f, -4.0, 9.0, &config).unwrap();
        let (lo, hi) = estimate.bracket;
        assert!(lo <= 0.7 && 0.7 <= hi, "cap {max_iterations}: [{lo}, {hi}]");
        assert!(estimate.iterations <= max_iterations);
    }
}

#[test]
fn test_counts_evaluations() {
    let mut calls = 0u32;
    let estimate = find_root(
        |x| {
            calls += 1;
            x.exp() - 3.0
        },
        0.0,
        2.0,
        &BrentConfig::default(),
    )
    .unwrap();
    assert!((estimate.root - 3f64.ln()).abs() < 1e-8);
    // Two endpoint evaluations plus one per iteration.
    assert_eq!(calls, estimate.iterations + 2);
}

#[test]
fn test_not_bracketed() {
    let err = find_root(|x| x * x + 1.0, -1.0, 1.0, &BrentConfig::default()).unwrap_err();
    assert!(matches!(err, RootFindingError::NotBracketed { .. }));
}
