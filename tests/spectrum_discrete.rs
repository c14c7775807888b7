use lyapunov::core::models::{DiagonalMap, Henon};
use lyapunov::{spectrum_discrete, LyapunovError};

#[test]
fn linear_2d_spectrum_is_log_of_diagonal() {
    let map = DiagonalMap { diag: vec![2.0, 0.5] };
    let spectrum = spectrum_discrete(&map, &[1.0, 1.0], 1000, 0).unwrap();
    assert_eq!(spectrum.len(), 2);
    assert!((spectrum[0] - 2.0f64.ln()).abs() < 1e-6, "l0={}", spectrum[0]);
    assert!((spectrum[1] - 0.5f64.ln()).abs() < 1e-6, "l1={}", spectrum[1]);
}

#[test]
fn spectrum_returns_one_value_per_dimension() {
    for dim in 1..=5 {
        let map = DiagonalMap { diag: vec![0.9; dim] };
        let state = vec![1.0; dim];
        let spectrum = spectrum_discrete(&map, &state, 100, 0).unwrap();
        assert_eq!(spectrum.len(), dim);
    }
}

#[test]
fn spectrum_is_sorted_descending() {
    let map = DiagonalMap { diag: vec![0.5, 2.0, 1.0] };
    let spectrum = spectrum_discrete(&map, &[1.0, 1.0, 1.0], 500, 0).unwrap();
    assert!(spectrum[0] >= spectrum[1] && spectrum[1] >= spectrum[2], "{spectrum:?}");
    assert!((spectrum[0] - 2.0f64.ln()).abs() < 1e-9);
    assert!((spectrum[2] - 0.5f64.ln()).abs() < 1e-9);
}

#[test]
fn zero_run_length_is_a_config_error() {
    let map = DiagonalMap { diag: vec![2.0, 0.5] };
    let err = spectrum_discrete(&map, &[1.0, 1.0], 0, 0).unwrap_err();
    assert!(matches!(err, LyapunovError::ConfigError(_)));
}

#[test]
fn state_dimension_mismatch_is_rejected() {
    let map = DiagonalMap { diag: vec![2.0, 0.5] };
    let err = spectrum_discrete(&map, &[1.0, 1.0, 1.0], 100, 0).unwrap_err();
    assert!(matches!(err, LyapunovError::DimensionMismatch(_)));
}

#[test]
fn singular_jacobian_yields_negative_infinity() {
    // A zero diagonal entry collapses one tangent direction: ln(0) = -inf
    // is a valid numerical outcome, not a crash
    let map = DiagonalMap { diag: vec![2.0, 0.0] };
    let spectrum = spectrum_discrete(&map, &[1.0, 1.0], 50, 0).unwrap();
    assert!((spectrum[0] - 2.0f64.ln()).abs() < 1e-9);
    assert!(spectrum[1].is_infinite() && spectrum[1] < 0.0, "l1={}", spectrum[1]);
}

#[test]
fn henon_exponent_sum_matches_constant_jacobian_determinant() {
    // |det J| = b everywhere for the Henon map, so the exponents must sum to
    // ln(b) regardless of the orbit
    let map = Henon::default();
    let spectrum = spectrum_discrete(&map, &[0.1, 0.1], 100_000, 1000).unwrap();
    let sum: f64 = spectrum.iter().sum();
    assert!((sum - 0.3f64.ln()).abs() < 1e-6, "sum={sum}");
    assert!(spectrum[0] > 0.38 && spectrum[0] < 0.46, "l0={}", spectrum[0]);
}
