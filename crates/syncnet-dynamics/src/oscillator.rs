// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Oscillator State
// ─────────────────────────────────────────────────────────────────────
//! Phase θ_i and natural frequency ω_i of every oscillator, with the
//! seeded initial distributions.

use std::f64::consts::{PI, TAU};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use syncnet_types::{InitialPhases, SimulationConfig, SyncError, SyncResult};

/// Per-oscillator state owned by one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorState {
    /// Current phases θ_i (rad).
    pub phases: Vec<f64>,
    /// Natural frequencies ω_i (rad per unit time).
    pub frequencies: Vec<f64>,
}

impl OscillatorState {
    /// Explicit phases, zero natural frequencies.
    pub fn new(phases: Vec<f64>) -> SyncResult<Self> {
        let n = phases.len();
        Self::with_frequencies(phases, vec![0.0; n])
    }

    pub fn with_frequencies(phases: Vec<f64>, frequencies: Vec<f64>) -> SyncResult<Self> {
        if phases.len() != frequencies.len() {
            return Err(SyncError::Validation(format!(
                "{} phases but {} frequencies",
                phases.len(),
                frequencies.len()
            )));
        }
        if let Some(i) = phases
            .iter()
            .chain(frequencies.iter())
            .position(|v| !v.is_finite())
        {
            return Err(SyncError::Validation(format!(
                "non-finite initial value at position {i}"
            )));
        }
        Ok(Self {
            phases,
            frequencies,
        })
    }

    /// Draw `n` initial phases from `distribution` and natural frequencies
    /// from `frequency · U[0, 1)`, reproducibly for a given seed.
    pub fn initialise(
        n: usize,
        distribution: InitialPhases,
        frequency: f64,
        seed: u64,
    ) -> SyncResult<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let phases: Vec<f64> = match distribution {
            InitialPhases::RandomUniform => (0..n).map(|_| rng.gen::<f64>() * TAU).collect(),
            InitialPhases::RandomGaussian => {
                let normal = Normal::new(PI, PI / 4.0)
                    .map_err(|e| SyncError::Numerical(format!("phase distribution: {e}")))?;
                (0..n).map(|_| normal.sample(&mut rng)).collect()
            }
            InitialPhases::Equipartition => (0..n).map(|i| PI / n as f64 * i as f64).collect(),
        };

        let frequencies: Vec<f64> = if frequency > 0.0 {
            (0..n).map(|_| frequency * rng.gen::<f64>()).collect()
        } else {
            vec![0.0; n]
        };

        Self::with_frequencies(phases, frequencies)
    }

    pub fn from_config(n: usize, cfg: &SimulationConfig) -> SyncResult<Self> {
        Self::initialise(n, cfg.initial_phases, cfg.frequency, cfg.seed)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}
