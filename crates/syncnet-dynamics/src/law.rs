// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Phase Update Law
// ─────────────────────────────────────────────────────────────────────
//! Right-hand side of the phase equations. The default law is the
//! neighbour-normalised Kuramoto coupling:
//!
//!   dθ_i/dt = ω_i + (K / |N_i|) Σ_{k ∈ N_i} w_ik sin(θ_k - θ_i)
//!
//! with |N_i| treated as 1 for isolated oscillators.

use syncnet_graph::EdgeWeights;

/// Read-only view of the network handed to a phase law.
pub struct NetworkView<'a> {
    /// Ascending neighbour list per oscillator.
    pub neighbors: &'a [Vec<usize>],
    pub weights: &'a dyn EdgeWeights,
    /// Natural frequencies ω_i.
    pub frequencies: &'a [f64],
}

/// Trait for phase-update laws.
pub trait PhaseLaw: Send + Sync {
    /// dθ_index/dt evaluated on `phases`.
    fn rate(&self, index: usize, phases: &[f64], view: &NetworkView<'_>) -> f64;

    /// Rates of every oscillator, all evaluated on the same `phases`.
    fn rates(&self, phases: &[f64], view: &NetworkView<'_>, out: &mut [f64]) {
        for (index, rate) in out.iter_mut().enumerate() {
            *rate = self.rate(index, phases, view);
        }
    }
}

/// Kuramoto phase coupling with global strength K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KuramotoLaw {
    pub coupling: f64,
}

impl KuramotoLaw {
    pub fn new(coupling: f64) -> Self {
        Self { coupling }
    }
}

impl Default for KuramotoLaw {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PhaseLaw for KuramotoLaw {
    fn rate(&self, index: usize, phases: &[f64], view: &NetworkView<'_>) -> f64 {
        let theta = phases[index];
        let neighbors = &view.neighbors[index];

        let mut sum = 0.0;
        for &k in neighbors {
            sum += view.weights.weight(index, k) * (phases[k] - theta).sin();
        }

        let count = neighbors.len().max(1) as f64;
        view.frequencies[index] + self.coupling * sum / count
    }
}
