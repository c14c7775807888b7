use super::error::LyapunovError;
use super::integrator::Stepper;
use super::linalg::{matvec_into, orthonormalize};
use super::system::{transient_discrete, ContinuousSystem, DiscreteSystem, ScalarMap};

fn check_run_length(n: usize) -> Result<(), LyapunovError> {
    if n == 0 {
        return Err(LyapunovError::config("run length N must be positive"));
    }
    Ok(())
}

fn check_state_dim(dim: usize, state: &[f64]) -> Result<(), LyapunovError> {
    if state.len() != dim {
        return Err(LyapunovError::dimension(&format!(
            "state has {} entries, system expects {}",
            state.len(),
            dim
        )));
    }
    Ok(())
}

fn sort_descending(values: &mut [f64]) {
    // Explicit post-processing: QR accumulation order carries no ordering
    // guarantee, so the public functions sort before returning
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
}

/// Full Lyapunov spectrum of a discrete-time system.
///
/// Evolves an orthonormal tangent frame alongside the trajectory; every step
/// the frame is advanced by the Jacobian and re-orthonormalized, and the log
/// of each diagonal scale factor is accumulated. Returns the D exponents
/// sorted from largest to smallest. A singular Jacobian produces `-inf`
/// entries, which propagate as valid output.
pub fn spectrum_discrete<S: DiscreteSystem>(
    system: &S,
    x0: &[f64],
    n: usize,
    ttr: usize,
) -> Result<Vec<f64>, LyapunovError> {
    check_run_length(n)?;
    let dim = system.dimension();
    check_state_dim(dim, x0)?;

    // All buffers are allocated here once; the loop mutates them in place
    let mut state = x0.to_vec();
    let mut scratch = vec![0.0; dim];
    transient_discrete(system, &mut state, ttr, &mut scratch);

    let mut frame = super::linalg::identity_frame(dim);
    let mut jac = vec![vec![0.0; dim]; dim];
    let mut col = vec![0.0; dim];
    let mut diag = vec![0.0; dim];
    let mut sums = vec![0.0; dim];

    for _ in 0..n {
        system.step(&state, &mut scratch);
        state.copy_from_slice(&scratch);
        system.jacobian(&state, &mut jac);
        for j in 0..dim {
            matvec_into(&jac, &frame[j], &mut col);
            frame[j].copy_from_slice(&col);
        }
        orthonormalize(&mut frame, &mut diag);
        for j in 0..dim {
            sums[j] += diag[j].ln();
        }
    }

    for s in sums.iter_mut() {
        *s /= n as f64;
    }
    sort_descending(&mut sums);
    Ok(sums)
}

/// Full Lyapunov spectrum of a continuous-time system.
///
/// The state and the D tangent vectors are integrated jointly (variational
/// equations) over each interval of length `dt`, then the frame is
/// re-orthonormalized. Normalization is by the total elapsed time `n * dt`.
pub fn spectrum_continuous<S, St>(
    system: &S,
    x0: &[f64],
    n: usize,
    dt: f64,
    ttr: f64,
    stepper: &mut St,
) -> Result<Vec<f64>, LyapunovError>
where
    S: ContinuousSystem,
    St: Stepper,
{
    check_run_length(n)?;
    if dt <= 0.0 {
        return Err(LyapunovError::config("sampling cadence dt must be positive"));
    }
    let dim = system.dimension();
    check_state_dim(dim, x0)?;

    let mut state = x0.to_vec();
    if ttr > 0.0 {
        stepper.advance(|t, x, dx| system.rhs(t, x, dx), 0.0, ttr, &mut state);
    }

    // Joint vector: state followed by the frame columns, flattened
    let mut joint = vec![0.0; dim + dim * dim];
    joint[..dim].copy_from_slice(&state);
    for j in 0..dim {
        joint[dim + j * dim + j] = 1.0;
    }

    let mut frame = vec![vec![0.0; dim]; dim];
    let mut jac = vec![vec![0.0; dim]; dim];
    let mut diag = vec![0.0; dim];
    let mut sums = vec![0.0; dim];
    let mut t = ttr;

    for _ in 0..n {
        let t_next = t + dt;
        stepper.advance(
            |tt, y, dy| {
                let (x, cols) = y.split_at(dim);
                let (dx, dcols) = dy.split_at_mut(dim);
                system.rhs(tt, x, dx);
                system.jacobian(tt, x, &mut jac);
                for j in 0..dim {
                    matvec_into(&jac, &cols[j * dim..(j + 1) * dim], &mut dcols[j * dim..(j + 1) * dim]);
                }
            },
            t,
            t_next,
            &mut joint,
        );
        t = t_next;

        for j in 0..dim {
            frame[j].copy_from_slice(&joint[dim + j * dim..dim + (j + 1) * dim]);
        }
        orthonormalize(&mut frame, &mut diag);
        for j in 0..dim {
            sums[j] += diag[j].ln();
            joint[dim + j * dim..dim + (j + 1) * dim].copy_from_slice(&frame[j]);
        }
    }

    let total_time = n as f64 * dt;
    for s in sums.iter_mut() {
        *s /= total_time;
    }
    sort_descending(&mut sums);
    Ok(sums)
}

/// One-dimensional specialization: the exponent is the orbit average of
/// `ln |f'(x)|`, starting at the point reached immediately after the
/// transient.
pub fn scalar_exponent<M: ScalarMap>(
    map: &M,
    x0: f64,
    n: usize,
    ttr: usize,
) -> Result<f64, LyapunovError> {
    check_run_length(n)?;
    let mut x = x0;
    for _ in 0..ttr {
        x = map.next(x);
    }
    let mut sum = 0.0;
    for _ in 0..n {
        sum += map.derivative(x).abs().ln();
        x = map.next(x);
    }
    Ok(sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Halving;
    impl ScalarMap for Halving {
        fn next(&self, x: f64) -> f64 { 0.5 * x }
        fn derivative(&self, _x: f64) -> f64 { 0.5 }
    }

    #[test]
    fn test_scalar_contracting_map() {
        let lambda = scalar_exponent(&Halving, 1.0, 1000, 10).unwrap();
        assert!((lambda - 0.5f64.ln()).abs() < 1e-12, "lambda={lambda}");
    }

    #[test]
    fn test_zero_run_length_rejected() {
        let err = scalar_exponent(&Halving, 1.0, 0, 0).unwrap_err();
        assert!(matches!(err, LyapunovError::ConfigError(_)));
    }

    #[test]
    fn test_spectrum_matches_scalar_path() {
        // The D=1 QR machinery must agree with the derivative average
        let spectrum = spectrum_discrete(&Halving, &[1.0], 500, 0).unwrap();
        assert_eq!(spectrum.len(), 1);
        assert!((spectrum[0] - 0.5f64.ln()).abs() < 1e-12);
    }
}
