use numerics_rs::prelude::*;

const PARITY_TOLERANCE: f64 = 1e-6;

#[test]
fn test_put_call_parity_grid() {
    for spot in [60.0, 100.0, 140.0] {
        for strike in [80.0, 100.0, 120.0] {
            for (time, rate, vol) in [(0.1, 0.0, 0.1), (1.0, 0.05, 0.2), (3.0, 0.08, 0.6)] {
                let call =
                    BlackScholes::option_price(spot, strike, time, rate, vol, OptionType::Call);
                let put =
                    BlackScholes::option_price(spot, strike, time, rate, vol, OptionType::Put);
                let forward = spot - strike * (-rate * time).exp();
                assert!(
                    (call - put - forward).abs() < PARITY_TOLERANCE,
                    "parity broken at S={spot} K={strike} T={time} r={rate} vol={vol}"
                );
            }
        }
    }
}

#[test]
fn test_norm_cdf_symmetry() {
    assert_eq!(BlackScholes::norm_cdf(0.0), 0.5);
    for i in 1..=40 {
        let x = i as f64 * 0.2;
        let sum = BlackScholes::norm_cdf(x) + BlackScholes::norm_cdf(-x);
        assert!((sum - 1.0).abs() < 1e-12, "x={x}");
    }
}

#[test]
fn test_reference_round_trip() {
    let base = OptionSpec::call(100.0, 100.0, 1.0, 0.05, 0.0).with_bracket(0.01, 3.0);
    let price = BlackScholes::price(&base, 0.2);
    assert!((price - 10.4506).abs() < 1e-3);

    let result = solve_iv(&base.with_market_price(price));
    assert!(result.converged);
    assert!((result.implied_volatility - 0.2).abs() < 1e-4);
}

#[test]
fn test_below_intrinsic_reference() {
    let spec = OptionSpec::call(100.0, 90.0, 1.0, 0.05, 5.0);
    assert!(matches!(
        try_solve_iv(&spec),
        Err(IVError::BelowIntrinsic { .. })
    ));
}

#[test]
fn test_objective_changes_sign_at_root() {
    let base = OptionSpec::put(100.0, 110.0, 0.5, 0.02, 0.0);
    let spec = base.with_market_price(BlackScholes::price(&base, 0.3));
    let objective = VolatilityObjective::new(&spec);
    assert!(objective.evaluate(0.1) < 0.0);
    assert!(objective.evaluate(0.5) > 0.0);
    assert!(objective.evaluate(0.3).abs() < 1e-12);
}

#[test]
fn test_results_serialize() {
    let spec = OptionSpec::call(100.0, 100.0, 1.0, 0.05, 10.4506).with_tolerance(1e-6);
    let result = solve_iv(&spec);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("implied_volatility"));
    assert!(!json.contains("failure"));

    let spec_json = serde_json::to_string(&spec).unwrap();
    let restored: OptionSpec = serde_json::from_str(&spec_json).unwrap();
    assert_eq!(restored, spec);
}
