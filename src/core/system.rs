use rand::Rng;
use rand_distr::StandardNormal;

use super::linalg::norm;

/// A discrete-time dynamical system of fixed dimension.
///
/// All methods write into caller-provided buffers so the estimation loops can
/// run without per-step allocation at any dimension.
pub trait DiscreteSystem {
    fn dimension(&self) -> usize;

    /// One application of the map: `out = f(x)`.
    fn step(&self, x: &[f64], out: &mut [f64]);

    /// Jacobian of the map at `x`, written row-major into `out`.
    fn jacobian(&self, x: &[f64], out: &mut [Vec<f64>]);
}

/// A continuous-time dynamical system (a flow) of fixed dimension.
pub trait ContinuousSystem {
    fn dimension(&self) -> usize;

    /// Equations of motion: `dxdt = F(t, x)`.
    fn rhs(&self, t: f64, x: &[f64], dxdt: &mut [f64]);

    /// Jacobian of the flow at `(t, x)`, written row-major into `out`.
    fn jacobian(&self, t: f64, x: &[f64], out: &mut [Vec<f64>]);
}

/// One-dimensional map with a known derivative, for the scalar
/// specialization of the exponent estimators.
pub trait ScalarMap {
    fn next(&self, x: f64) -> f64;
    fn derivative(&self, x: f64) -> f64;
}

impl<M: ScalarMap> DiscreteSystem for M {
    fn dimension(&self) -> usize { 1 }
    fn step(&self, x: &[f64], out: &mut [f64]) {
        out[0] = self.next(x[0]);
    }
    fn jacobian(&self, x: &[f64], out: &mut [Vec<f64>]) {
        out[0][0] = self.derivative(x[0]);
    }
}

pub fn transient_discrete<S: DiscreteSystem>(system: &S, state: &mut [f64], ttr: usize, scratch: &mut [f64]) {
    // Evolves `state` for `ttr` steps to discard initial-condition dependence.
    // `ttr = 0` leaves the state untouched.
    for _ in 0..ttr {
        system.step(state, scratch);
        state.copy_from_slice(scratch);
    }
}

/// Perturbation initializer for the two-trajectory method: given the
/// reference state and `d0`, produce the perturbed companion state.
pub type InitTest = fn(&[f64], f64) -> Vec<f64>;

pub fn uniform_perturbation(reference: &[f64], d0: f64) -> Vec<f64> {
    // Default initializer: offset every component by d0/sqrt(D) so the
    // perturbed state lies at distance exactly d0 from the reference
    let offset = d0 / (reference.len() as f64).sqrt();
    reference.iter().map(|&x| x + offset).collect()
}

pub fn random_perturbation(reference: &[f64], d0: f64) -> Vec<f64> {
    // Random-direction initializer: isotropic Gaussian direction scaled to d0
    let mut rng = rand::thread_rng();
    let mut delta: Vec<f64> = reference.iter().map(|_| rng.sample(StandardNormal)).collect();
    let mut len = norm(&delta);
    if len == 0.0 {
        delta[0] = 1.0;
        len = 1.0;
    }
    reference
        .iter()
        .zip(&delta)
        .map(|(&x, &d)| x + d * d0 / len)
        .collect()
}
