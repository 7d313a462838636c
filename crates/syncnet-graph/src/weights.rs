// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Edge Weights
// ─────────────────────────────────────────────────────────────────────
//! Coupling strength per connection. Unweighted networks use
//! `UnitWeights`; distance-weighted networks carry a `WeightMatrix`.

use serde::{Deserialize, Serialize};

/// Trait for per-edge coupling strengths.
pub trait EdgeWeights: Send + Sync {
    fn weight(&self, from: usize, to: usize) -> f64;

    /// Oscillator count the weights were built for, if fixed.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

/// Every connection has strength 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitWeights;

impl EdgeWeights for UnitWeights {
    #[inline]
    fn weight(&self, _from: usize, _to: usize) -> f64 {
        1.0
    }
}

/// Dense N×N weight matrix, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    n: usize,
    values: Vec<f64>,
}

impl WeightMatrix {
    /// All-zero matrix for `n` oscillators.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n + col]
    }

    /// Set both `(a, b)` and `(b, a)`.
    pub fn set_symmetric(&mut self, a: usize, b: usize, value: f64) {
        self.values[a * self.n + b] = value;
        self.values[b * self.n + a] = value;
    }

    /// Apply `f` to every off-diagonal entry of the upper triangle and
    /// mirror the result.
    pub fn map_pairs(&mut self, mut f: impl FnMut(f64) -> f64) {
        let n = self.n;
        for i in 0..n {
            for j in (i + 1)..n {
                let value = f(self.values[i * n + j]);
                self.set_symmetric(i, j, value);
            }
        }
    }

    /// Iterator over the upper-triangle entries `(i, j, w)`, `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.n;
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.get(i, j))))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl EdgeWeights for WeightMatrix {
    #[inline]
    fn weight(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.n)
    }
}
