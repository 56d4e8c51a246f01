//! Linear SEM fitting and effect sizes on noise-orthogonalised data, where
//! OLS recovers the generating coefficients exactly.

use causa_core::config::EstimationConfig;
use causa_core::errors::{CausaErrorCode, EstimationError};
use causa_effects::{adjusted_effect, LinearSem};
use test_fixtures::{chain, fork, mediator, LinearGaussianSem};

const TOL: f64 = 1e-9;

fn pairs(sem: &LinearGaussianSem) -> Vec<(String, String)> {
    sem.edges().into_iter().map(|(a, b, _)| (a, b)).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOL
}

#[test]
fn recovers_generating_coefficients() {
    let gen = mediator();
    let data = gen.sample(500, 42);
    let sem = LinearSem::fit(&data, &pairs(&gen), &EstimationConfig::default()).unwrap();

    for (from, to, beta) in gen.edges() {
        let fitted = sem.direct_effect(&from, &to).unwrap();
        assert!(close(fitted, beta), "{from} -> {to}: {fitted} vs {beta}");
    }
    let y = sem.equation("y").unwrap();
    assert_eq!(y.parents().collect::<Vec<_>>(), vec!["x", "m"]);
    assert!(y.intercept.abs() < TOL);
    assert!((y.residual_variance - 1.0).abs() < 0.01);
    assert!(y.r_squared > 0.0 && y.r_squared < 1.0);
}

#[test]
fn equations_follow_topological_order() {
    let gen = mediator();
    let data = gen.sample(200, 1);
    let sem = LinearSem::fit(&data, &pairs(&gen), &EstimationConfig::default()).unwrap();
    let targets: Vec<&str> = sem.equations().iter().map(|e| e.target.as_str()).collect();
    assert_eq!(targets, vec!["x", "m", "y"]);
    assert!(sem.equation("x").unwrap().is_exogenous());
}

#[test]
fn total_effect_sums_path_products() {
    let gen = mediator();
    let data = gen.sample(500, 42);
    let sem = LinearSem::fit(&data, &pairs(&gen), &EstimationConfig::default()).unwrap();

    assert!(close(sem.total_effect("x", "y").unwrap(), 0.4 + 0.6 * 0.5));
    assert!(close(sem.total_effect("m", "y").unwrap(), 0.5));
    assert_eq!(sem.total_effect("y", "x").unwrap(), 0.0);
    assert_eq!(sem.total_effect("x", "x").unwrap(), 1.0);
}

#[test]
fn direct_effect_is_zero_without_edge() {
    let gen = chain();
    let data = gen.sample(300, 3);
    let sem = LinearSem::fit(&data, &pairs(&gen), &EstimationConfig::default()).unwrap();
    assert_eq!(sem.direct_effect("x", "z").unwrap(), 0.0);
    assert!(close(sem.total_effect("x", "z").unwrap(), 0.8 * 0.7));
}

#[test]
fn backdoor_adjustment_removes_confounding() {
    // z confounds x and y; x has no effect on y.
    let gen = fork();
    let data = gen.sample(500, 9);
    let edges = pairs(&gen);
    let config = EstimationConfig::default();

    let adjusted = adjusted_effect(&data, &edges, "x", "y", &config).unwrap();
    assert!(adjusted.abs() < TOL, "adjusted = {adjusted}");

    // Without adjustment the confounded association shows up.
    let naive = adjusted_effect(&data, &[], "x", "y", &config).unwrap();
    assert!(naive.abs() > 0.1);
}

#[test]
fn backdoor_adjustment_recovers_confounded_effect() {
    let gen = LinearGaussianSem::new(&["z", "x", "y"])
        .edge("z", "x", 0.9)
        .edge("z", "y", 0.8)
        .edge("x", "y", 0.5);
    let data = gen.sample(500, 13);
    let sem = LinearSem::fit(&data, &pairs(&gen), &EstimationConfig::default()).unwrap();

    let report = sem.report(&data, "x", "y").unwrap();
    assert!(close(report.direct, 0.5));
    assert!(close(report.total, 0.5));
    assert!(close(report.adjusted, 0.5));
}

#[test]
fn mediated_adjusted_effect_equals_total() {
    let gen = mediator();
    let data = gen.sample(500, 42);
    let sem = LinearSem::fit(&data, &pairs(&gen), &EstimationConfig::default()).unwrap();
    let report = sem.report(&data, "x", "y").unwrap();
    assert!(close(report.adjusted, report.total));
    assert!(close(report.direct, 0.4));
}

#[test]
fn cyclic_edges_are_rejected() {
    let data = chain().sample(100, 1);
    let edges = vec![
        ("x".to_string(), "y".to_string()),
        ("y".to_string(), "z".to_string()),
        ("z".to_string(), "x".to_string()),
    ];
    let err = LinearSem::fit(&data, &edges, &EstimationConfig::default()).unwrap_err();
    match &err {
        EstimationError::NotADag { cycle } => assert_eq!(cycle, "x, y, z"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(err.error_code(), "CYCLE_DETECTED");

    let self_loop = vec![("x".to_string(), "x".to_string())];
    assert!(matches!(
        LinearSem::fit(&data, &self_loop, &EstimationConfig::default()),
        Err(EstimationError::NotADag { .. })
    ));
}

#[test]
fn unknown_variables_are_rejected() {
    let data = chain().sample(100, 1);
    let edges = vec![("x".to_string(), "nope".to_string())];
    let err = LinearSem::fit(&data, &edges, &EstimationConfig::default()).unwrap_err();
    assert!(matches!(err, EstimationError::UnknownVariable(ref v) if v == "nope"));

    let sem = LinearSem::fit(&data, &[], &EstimationConfig::default()).unwrap();
    assert!(sem.total_effect("x", "w").is_err());
    assert!(sem.direct_effect("w", "x").is_err());
}

#[test]
fn insufficient_samples() {
    // y has three parameters and needs 9 rows at 3 per parameter.
    let gen = mediator();
    let data = gen.sample(6, 1);
    let config = EstimationConfig {
        min_rows_per_parameter: Some(3),
        ..Default::default()
    };
    let err = LinearSem::fit(&data, &pairs(&gen), &config).unwrap_err();
    assert!(matches!(err, EstimationError::InsufficientSamples { ref target, .. } if target == "y"));
}

#[test]
fn summary_serializes() {
    let gen = chain();
    let data = gen.sample(100, 5);
    let sem = LinearSem::fit(&data, &pairs(&gen), &EstimationConfig::default()).unwrap();
    let json = serde_json::to_value(sem.summary()).unwrap();
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);
    assert_eq!(json["equations"].as_array().unwrap().len(), 3);
    assert_eq!(json["equations"][0]["target"], "x");

    let text = format!("{sem:.2}");
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().nth(1).unwrap().starts_with("y = "));
}
