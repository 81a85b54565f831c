use numerics_rs::prelude::*;
use numerics_rs::records::{
    CsvRecord, MAX_CIRCUITS, circuit_output_rows, parse_circuits, parse_options, to_csv,
};

#[test]
fn test_option_rows_feed_the_solver() {
    let text = "\
problem_type,S,K,T,r,C_market,sigma_low,sigma_high,tolerance,max_iterations
option_call,100,100,1,0.05,10.4506,0.01,3.0,1e-6,100
option_put,100,100,1,0.05,5.5735,0.01,3.0,1e-6,100
";
    let parsed = parse_options(text);
    assert!(parsed.is_clean());

    let rows: Vec<VolatilityOutputRecord> = parsed
        .records
        .iter()
        .map(|record| VolatilityOutputRecord::new(&record.spec, &solve_iv(&record.spec)))
        .collect();
    for row in &rows {
        assert!((row.implied_volatility - 0.2).abs() < 1e-3);
    }

    let csv = to_csv(&rows).unwrap();
    let header = VolatilityOutputRecord::csv_header().join(",");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(header.as_str()));
    let first: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(first.len(), 13);
    assert_eq!(first[0], "option_call");
    assert_eq!(first[8], "yes");
}

#[test]
fn test_unknown_tags_and_bad_counts_are_isolated() {
    let text = "\
circuit_type,R,C,L,V_source,I_s,n,V_t,V0,t_start,t_end,step_size,output_interval
rc_diode,1000,1e-6,5.0,1e-9,1.0,0.02585,0.0,0.0,0.005,1e-6,1e-4
rl_diode,1000,1e-3,5.0,1e-9,1.0,0.02585,0.0,0.0,0.005,1e-6,1e-4
rlc_diode,10,1e-6,1e-3,5.0,1e-9,1.0,0.02585,0.0,0.0,0.002,1e-7
rlc_diode,10,1e-6,1e-3,5.0,1e-9,1.0,0.02585,0.0,0.0,0.002,1e-7,1e-5,0.0,9
rlc_diode,10,1e-6,1e-3,5.0,1e-9,1.0,0.02585,0.0,0.0,0.002,1e-7,1e-5
";
    let parsed = parse_circuits(text);
    assert_eq!(parsed.records.len(), 2);
    let lines: Vec<usize> = parsed.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![3, 4, 5]);
    assert_eq!(parsed.records[1].spec.kind(), CircuitKind::Rlc);
}

#[test]
fn test_circuit_rows_per_sample() {
    let spec = CircuitSpec::rc(1000.0, 1e-6, 5.0, DiodeParams::default(), 0.0)
        .with_time_span(0.0, 1e-3)
        .with_step_size(1e-5);
    let trajectory = simulate(&spec, &SimulationConfig::default()).unwrap();
    let rows = circuit_output_rows(&spec, &trajectory);
    assert_eq!(rows.len(), trajectory.len());

    let csv = to_csv(&rows).unwrap();
    for line in csv.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 17);
        assert_eq!(fields[0], "rc_diode");
        assert_eq!(fields[3], "0.00e+00");
    }
}

#[test]
fn test_circuit_cap_matches_limit() {
    let row = "rlc_diode,10,1e-6,1e-3,5.0,1e-9,1.0,0.02585,0.0,0.0,0.002,1e-7,1e-5\n";
    let parsed = parse_circuits(&row.repeat(MAX_CIRCUITS * 2));
    assert_eq!(parsed.records.len(), MAX_CIRCUITS);
    assert_eq!(parsed.ignored, MAX_CIRCUITS);
}
