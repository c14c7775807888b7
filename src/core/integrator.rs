/// Time stepper used by the continuous-time estimators.
///
/// `advance` integrates `y` in place from `t0` to exactly `t1`, subdividing
/// the interval internally as it sees fit. The step-size hint survives across
/// calls and can be copied between stepper instances, which the two-trajectory
/// method uses to resynchronize the perturbed trajectory after a rescale.
pub trait Stepper: Clone {
    fn advance<F>(&mut self, rhs: F, t0: f64, t1: f64, y: &mut [f64])
    where
        F: FnMut(f64, &[f64], &mut [f64]);

    fn step_hint(&self) -> f64;
    fn set_step_hint(&mut self, h: f64);
}

/// Classic fixed-substep fourth-order Runge-Kutta.
#[derive(Clone)]
pub struct Rk4 {
    h: f64,
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    ytmp: Vec<f64>,
}

impl Rk4 {
    pub fn new(h: f64) -> Self {
        Rk4 { h, k1: Vec::new(), k2: Vec::new(), k3: Vec::new(), k4: Vec::new(), ytmp: Vec::new() }
    }

    fn ensure_scratch(&mut self, n: usize) {
        // Scratch buffers are sized once; later calls reuse them
        if self.k1.len() != n {
            self.k1 = vec![0.0; n];
            self.k2 = vec![0.0; n];
            self.k3 = vec![0.0; n];
            self.k4 = vec![0.0; n];
            self.ytmp = vec![0.0; n];
        }
    }
}

impl Stepper for Rk4 {
    fn advance<F>(&mut self, mut rhs: F, t0: f64, t1: f64, y: &mut [f64])
    where
        F: FnMut(f64, &[f64], &mut [f64]),
    {
        let n = y.len();
        self.ensure_scratch(n);
        let span = t1 - t0;
        if span <= 0.0 {
            return;
        }
        let substeps = (span / self.h).ceil().max(1.0) as usize;
        let h = span / substeps as f64;
        let mut t = t0;

        for _ in 0..substeps {
            rhs(t, y, &mut self.k1);
            for i in 0..n {
                self.ytmp[i] = y[i] + 0.5 * h * self.k1[i];
            }
            rhs(t + 0.5 * h, &self.ytmp, &mut self.k2);
            for i in 0..n {
                self.ytmp[i] = y[i] + 0.5 * h * self.k2[i];
            }
            rhs(t + 0.5 * h, &self.ytmp, &mut self.k3);
            for i in 0..n {
                self.ytmp[i] = y[i] + h * self.k3[i];
            }
            rhs(t + h, &self.ytmp, &mut self.k4);
            for i in 0..n {
                y[i] += h * (self.k1[i] + 2.0 * self.k2[i] + 2.0 * self.k3[i] + self.k4[i]) / 6.0;
            }
            t += h;
        }
    }

    fn step_hint(&self) -> f64 { self.h }
    fn set_step_hint(&mut self, h: f64) { self.h = h; }
}

/// Adaptive Runge-Kutta-Fehlberg 4(5) with per-component tolerance control.
/// The hint is the last accepted step size.
#[derive(Clone)]
pub struct Rkf45 {
    atol: f64,
    rtol: f64,
    h: f64,
    k: [Vec<f64>; 6],
    ytmp: Vec<f64>,
    y4: Vec<f64>,
    y5: Vec<f64>,
}

impl Rkf45 {
    pub fn new(atol: f64, rtol: f64, h0: f64) -> Self {
        Rkf45 {
            atol,
            rtol,
            h: h0,
            k: Default::default(),
            ytmp: Vec::new(),
            y4: Vec::new(),
            y5: Vec::new(),
        }
    }

    fn ensure_scratch(&mut self, n: usize) {
        if self.ytmp.len() != n {
            self.k = [
                vec![0.0; n],
                vec![0.0; n],
                vec![0.0; n],
                vec![0.0; n],
                vec![0.0; n],
                vec![0.0; n],
            ];
            self.ytmp = vec![0.0; n];
            self.y4 = vec![0.0; n];
            self.y5 = vec![0.0; n];
        }
    }
}

// Fehlberg tableau
const A2: [f64; 1] = [1.0 / 4.0];
const A3: [f64; 2] = [3.0 / 32.0, 9.0 / 32.0];
const A4: [f64; 3] = [1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0];
const A5: [f64; 4] = [439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0];
const A6: [f64; 5] = [-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0];
const C: [f64; 6] = [0.0, 1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0];
const B4: [f64; 6] = [25.0 / 216.0, 0.0, 1408.0 / 2565.0, 2197.0 / 4104.0, -1.0 / 5.0, 0.0];
const B5: [f64; 6] = [16.0 / 135.0, 0.0, 6656.0 / 12825.0, 28561.0 / 56430.0, -9.0 / 50.0, 2.0 / 55.0];

impl Stepper for Rkf45 {
    fn advance<F>(&mut self, mut rhs: F, t0: f64, t1: f64, y: &mut [f64])
    where
        F: FnMut(f64, &[f64], &mut [f64]),
    {
        let n = y.len();
        self.ensure_scratch(n);
        let mut t = t0;

        while t < t1 {
            let mut h = self.h.min(t1 - t);
            loop {
                let stages: [&[f64]; 5] = [&A2, &A3, &A4, &A5, &A6];
                rhs(t, y, &mut self.k[0]);
                for s in 0..5 {
                    for i in 0..n {
                        let mut acc = y[i];
                        for (j, &a) in stages[s].iter().enumerate() {
                            acc += h * a * self.k[j][i];
                        }
                        self.ytmp[i] = acc;
                    }
                    rhs(t + C[s + 1] * h, &self.ytmp, &mut self.k[s + 1]);
                }
                let mut err = 0.0f64;
                for i in 0..n {
                    let mut y4 = y[i];
                    let mut y5 = y[i];
                    for s in 0..6 {
                        y4 += h * B4[s] * self.k[s][i];
                        y5 += h * B5[s] * self.k[s][i];
                    }
                    self.y4[i] = y4;
                    self.y5[i] = y5;
                    let scale = self.atol + self.rtol * y[i].abs().max(y5.abs());
                    err = err.max((y5 - y4).abs() / scale);
                }
                if err <= 1.0 {
                    y.copy_from_slice(&self.y5);
                    t += h;
                    let grow = if err == 0.0 { 5.0 } else { (0.9 / err.powf(0.2)).clamp(0.2, 5.0) };
                    self.h = h * grow;
                    break;
                }
                h *= (0.9 / err.powf(0.2)).clamp(0.1, 0.9);
            }
        }
    }

    fn step_hint(&self) -> f64 { self.h }
    fn set_step_hint(&mut self, h: f64) { self.h = h; }
}

#[cfg(test)]
mod tests {
    use super::*;

    // y' = a*y has the closed form y(t) = y0 * exp(a*t)
    fn exp_rhs(a: f64) -> impl FnMut(f64, &[f64], &mut [f64]) {
        move |_t, y, dy| {
            for i in 0..y.len() {
                dy[i] = a * y[i];
            }
        }
    }

    #[test]
    fn test_rk4_exponential() {
        let mut stepper = Rk4::new(0.01);
        let mut y = vec![1.0];
        stepper.advance(exp_rhs(-1.0), 0.0, 2.0, &mut y);
        assert!((y[0] - (-2.0f64).exp()).abs() < 1e-8, "y={}", y[0]);
    }

    #[test]
    fn test_rkf45_exponential() {
        let mut stepper = Rkf45::new(1e-10, 1e-10, 0.1);
        let mut y = vec![1.0];
        stepper.advance(exp_rhs(0.5), 0.0, 3.0, &mut y);
        assert!((y[0] - 1.5f64.exp()).abs() < 1e-6, "y={}", y[0]);
    }

    #[test]
    fn test_hint_copies_between_instances() {
        let mut a = Rkf45::new(1e-8, 1e-8, 0.1);
        let mut y = vec![1.0, 2.0];
        a.advance(exp_rhs(1.0), 0.0, 1.0, &mut y);
        let mut b = Rkf45::new(1e-8, 1e-8, 0.1);
        b.set_step_hint(a.step_hint());
        assert_eq!(a.step_hint(), b.step_hint());
    }

    #[test]
    fn test_advance_to_exact_time() {
        // The stepper must land on t1 even when h does not divide the span
        let mut stepper = Rk4::new(0.3);
        let mut y = vec![1.0];
        stepper.advance(exp_rhs(1.0), 0.0, 1.0, &mut y);
        assert!((y[0] - 1.0f64.exp()).abs() < 1e-4, "y={}", y[0]);
    }
}
