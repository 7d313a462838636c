// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Configuration
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Largest oscillator count stored as a dense adjacency matrix.
/// Above it rows are packed into bitmaps.
pub const MAX_DENSE_OSCILLATORS: usize = 4096;

/// Canonical connection structures between oscillators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// No connections.
    None,
    /// Every oscillator coupled to every other.
    AllToAll,
    /// Square grid, up/down/left/right neighbours.
    GridFour,
    /// Square grid, GridFour plus diagonals.
    GridEight,
    /// Path graph, each oscillator coupled to its predecessor and successor.
    ListBidir,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::None => "none",
            Topology::AllToAll => "all_to_all",
            Topology::GridFour => "grid_four",
            Topology::GridEight => "grid_eight",
            Topology::ListBidir => "list_bidir",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_name(s).as_str() {
            "none" => Ok(Topology::None),
            "all_to_all" => Ok(Topology::AllToAll),
            "grid_four" => Ok(Topology::GridFour),
            "grid_eight" => Ok(Topology::GridEight),
            "list_bidir" => Ok(Topology::ListBidir),
            _ => Err(SyncError::InvalidTopology(s.to_string())),
        }
    }
}

/// Fixed-step explicit integrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Forward Euler, one rate evaluation per step.
    #[serde(alias = "fast")]
    Euler,
    /// Classic fourth-order Runge-Kutta.
    Rk4,
}

impl SolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Euler => "euler",
            SolverKind::Rk4 => "rk4",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_name(s).as_str() {
            "euler" | "fast" => Ok(SolverKind::Euler),
            "rk4" => Ok(SolverKind::Rk4),
            _ => Err(SyncError::UnsupportedSolver(s.to_string())),
        }
    }
}

/// Distribution of oscillator phases at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialPhases {
    /// Uniform in [0, 2π).
    RandomUniform,
    /// Normal around π with σ = π/4.
    RandomGaussian,
    /// θ_i = π / N · i.
    Equipartition,
}

impl FromStr for InitialPhases {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_name(s).as_str() {
            "random_uniform" => Ok(InitialPhases::RandomUniform),
            "random_gaussian" => Ok(InitialPhases::RandomGaussian),
            "equipartition" => Ok(InitialPhases::Equipartition),
            _ => Err(SyncError::Config(format!("unknown initial phase distribution: {s}"))),
        }
    }
}

/// Synchronisation measure used as the convergence criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMetric {
    /// Mean resultant length of all phases.
    #[default]
    Global,
    /// Mean phase agreement over connected pairs.
    Local,
}

fn normalise_name(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

/// Runtime configuration for one oscillatory-network simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Stop once the order metric reaches this value.
    /// Default: 0.998.
    pub order: f64,

    /// Integrator used for each step.
    /// Default: Euler.
    pub solver: SolverKind,

    /// Keep every snapshot instead of only the final one.
    /// Default: false.
    pub collect_dynamic: bool,

    /// Simulated time advanced per recorded step.
    /// Default: 0.1.
    pub step: f64,

    /// Integration sub-steps per recorded step.
    /// Default: 1.
    pub substeps: usize,

    /// Step budget; reaching it ends the run without convergence.
    /// Default: 1000.
    pub max_steps: usize,

    /// Global coupling strength K.
    /// Default: 1.0.
    pub coupling: f64,

    /// Upper bound of the random natural frequencies.
    /// Default: 0.0 (pure phase coupling).
    pub frequency: f64,

    /// Initial phase distribution.
    /// Default: RandomUniform.
    pub initial_phases: InitialPhases,

    /// Seed for the initial phase and frequency draws.
    /// Default: 42.
    pub seed: u64,

    /// Convergence metric.
    /// Default: Global.
    pub order_metric: OrderMetric,

    /// End the run early when the metric moves less than this per step.
    /// Default: None (disabled).
    pub stall_threshold: Option<f64>,

    /// Oscillator count above which adjacency rows are bit-packed.
    /// Default: 4096.
    pub dense_limit: usize,

    /// Phase tolerance (rad) for grouping synchronised oscillators.
    /// Default: 0.01.
    pub tolerance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            order: 0.998,
            solver: SolverKind::Euler,
            collect_dynamic: false,
            step: 0.1,
            substeps: 1,
            max_steps: 1000,
            coupling: 1.0,
            frequency: 0.0,
            initial_phases: InitialPhases::RandomUniform,
            seed: 42,
            order_metric: OrderMetric::Global,
            stall_threshold: None,
            dense_limit: MAX_DENSE_OSCILLATORS,
            tolerance: 0.01,
        }
    }
}

impl SimulationConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> SyncResult<()> {
        if !(self.order > 0.0 && self.order <= 1.0) {
            return Err(SyncError::Config(format!(
                "order must be in (0, 1], got {}",
                self.order
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SyncError::Config(format!(
                "step must be finite and > 0, got {}",
                self.step
            )));
        }
        if self.substeps == 0 {
            return Err(SyncError::Config("substeps must be >= 1".to_string()));
        }
        if self.max_steps == 0 {
            return Err(SyncError::Config("max_steps must be >= 1".to_string()));
        }
        if !self.coupling.is_finite() {
            return Err(SyncError::Config(format!(
                "coupling must be finite, got {}",
                self.coupling
            )));
        }
        if !(self.frequency.is_finite() && self.frequency >= 0.0) {
            return Err(SyncError::Config(format!(
                "frequency must be finite and >= 0, got {}",
                self.frequency
            )));
        }
        if self.dense_limit == 0 {
            return Err(SyncError::Config("dense_limit must be >= 1".to_string()));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SyncError::Config(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if let Some(threshold) = self.stall_threshold {
            if !(threshold.is_finite() && threshold > 0.0) {
                return Err(SyncError::Config(format!(
                    "stall_threshold must be finite and > 0, got {threshold}"
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SyncError::Config(format!("JSON parse error: {e}")))
    }
}
