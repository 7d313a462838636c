// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Fixed-Step Integrators
// ─────────────────────────────────────────────────────────────────────
//! Forward Euler and classic RK4 over the whole phase vector.
//!
//! Stage buffers are allocated once per solver, so stepping does not
//! allocate. Every stage evaluates all rates on one consistent vector.

use syncnet_types::SolverKind;

/// Explicit fixed-step integrator with pre-allocated stage buffers.
pub struct Solver {
    kind: SolverKind,
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    probe: Vec<f64>,
}

impl Solver {
    pub fn new(kind: SolverKind, n: usize) -> Self {
        let stages = match kind {
            SolverKind::Euler => 0,
            SolverKind::Rk4 => n,
        };
        Self {
            kind,
            k1: vec![0.0; n],
            k2: vec![0.0; stages],
            k3: vec![0.0; stages],
            k4: vec![0.0; stages],
            probe: vec![0.0; stages],
        }
    }

    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    /// Advance `y` by `h` under `dy/dt = derivative(y)`.
    pub fn step<F>(&mut self, y: &mut [f64], h: f64, mut derivative: F)
    where
        F: FnMut(&[f64], &mut [f64]),
    {
        match self.kind {
            SolverKind::Euler => {
                derivative(y, &mut self.k1);
                for (yi, k) in y.iter_mut().zip(self.k1.iter()) {
                    *yi += h * k;
                }
            }
            SolverKind::Rk4 => {
                let half = 0.5 * h;

                derivative(y, &mut self.k1);
                offset(&mut self.probe, y, &self.k1, half);
                derivative(&self.probe, &mut self.k2);
                offset(&mut self.probe, y, &self.k2, half);
                derivative(&self.probe, &mut self.k3);
                offset(&mut self.probe, y, &self.k3, h);
                derivative(&self.probe, &mut self.k4);

                let sixth = h / 6.0;
                for i in 0..y.len() {
                    y[i] += sixth * (self.k1[i] + 2.0 * self.k2[i] + 2.0 * self.k3[i] + self.k4[i]);
                }
            }
        }
    }
}

#[inline]
fn offset(out: &mut [f64], y: &[f64], k: &[f64], scale: f64) {
    for ((o, yi), ki) in out.iter_mut().zip(y).zip(k) {
        *o = yi + scale * ki;
    }
}
