use super::system::{ContinuousSystem, DiscreteSystem, ScalarMap};

/// Logistic map `x -> r x (1 - x)`. At `r = 4` the maximum exponent is
/// `ln 2`.
pub struct LogisticMap {
    pub r: f64,
}

impl ScalarMap for LogisticMap {
    fn next(&self, x: f64) -> f64 {
        self.r * x * (1.0 - x)
    }
    fn derivative(&self, x: f64) -> f64 {
        self.r * (1.0 - 2.0 * x)
    }
}

/// Linear map with a constant diagonal Jacobian; its spectrum is
/// `ln |diag[i]|` exactly.
pub struct DiagonalMap {
    pub diag: Vec<f64>,
}

impl DiscreteSystem for DiagonalMap {
    fn dimension(&self) -> usize {
        self.diag.len()
    }
    fn step(&self, x: &[f64], out: &mut [f64]) {
        for (i, &d) in self.diag.iter().enumerate() {
            out[i] = d * x[i];
        }
    }
    fn jacobian(&self, _x: &[f64], out: &mut [Vec<f64>]) {
        for (i, row) in out.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = if i == j { self.diag[i] } else { 0.0 };
            }
        }
    }
}

/// Henon map, chaotic at the classic parameters `a = 1.4, b = 0.3`
/// (largest exponent about 0.42).
pub struct Henon {
    pub a: f64,
    pub b: f64,
}

impl Default for Henon {
    fn default() -> Self {
        Henon { a: 1.4, b: 0.3 }
    }
}

impl DiscreteSystem for Henon {
    fn dimension(&self) -> usize {
        2
    }
    fn step(&self, x: &[f64], out: &mut [f64]) {
        out[0] = 1.0 - self.a * x[0] * x[0] + x[1];
        out[1] = self.b * x[0];
    }
    fn jacobian(&self, x: &[f64], out: &mut [Vec<f64>]) {
        out[0][0] = -2.0 * self.a * x[0];
        out[0][1] = 1.0;
        out[1][0] = self.b;
        out[1][1] = 0.0;
    }
}

/// Lorenz system; at the classic parameters the largest exponent is about
/// 0.906.
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for Lorenz {
    fn default() -> Self {
        Lorenz { sigma: 10.0, rho: 28.0, beta: 8.0 / 3.0 }
    }
}

impl ContinuousSystem for Lorenz {
    fn dimension(&self) -> usize {
        3
    }
    fn rhs(&self, _t: f64, x: &[f64], dxdt: &mut [f64]) {
        dxdt[0] = self.sigma * (x[1] - x[0]);
        dxdt[1] = x[0] * (self.rho - x[2]) - x[1];
        dxdt[2] = x[0] * x[1] - self.beta * x[2];
    }
    fn jacobian(&self, _t: f64, x: &[f64], out: &mut [Vec<f64>]) {
        out[0][0] = -self.sigma;
        out[0][1] = self.sigma;
        out[0][2] = 0.0;
        out[1][0] = self.rho - x[2];
        out[1][1] = -1.0;
        out[1][2] = -x[0];
        out[2][0] = x[1];
        out[2][1] = x[0];
        out[2][2] = -self.beta;
    }
}

/// Constant-coefficient linear flow `x' = diag * x`; its spectrum is
/// `diag` itself.
pub struct DiagonalFlow {
    pub diag: Vec<f64>,
}

impl ContinuousSystem for DiagonalFlow {
    fn dimension(&self) -> usize {
        self.diag.len()
    }
    fn rhs(&self, _t: f64, x: &[f64], dxdt: &mut [f64]) {
        for (i, &d) in self.diag.iter().enumerate() {
            dxdt[i] = d * x[i];
        }
    }
    fn jacobian(&self, _t: f64, _x: &[f64], out: &mut [Vec<f64>]) {
        for (i, row) in out.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = if i == j { self.diag[i] } else { 0.0 };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_henon_step_and_jacobian() {
        let map = Henon::default();
        let mut out = vec![0.0; 2];
        map.step(&[0.0, 0.0], &mut out);
        assert_eq!(out, vec![1.0, 0.0]);

        let mut jac = vec![vec![0.0; 2]; 2];
        map.jacobian(&[1.0, 0.0], &mut jac);
        assert_eq!(jac[0], vec![-2.8, 1.0]);
        assert_eq!(jac[1], vec![0.3, 0.0]);
    }

    #[test]
    fn test_lorenz_fixed_point_at_origin() {
        let flow = Lorenz::default();
        let mut dxdt = vec![0.0; 3];
        flow.rhs(0.0, &[0.0, 0.0, 0.0], &mut dxdt);
        assert_eq!(dxdt, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_logistic_derivative() {
        let map = LogisticMap { r: 4.0 };
        assert_eq!(map.derivative(0.5), 0.0);
        assert_eq!(map.next(0.5), 1.0);
    }
}
