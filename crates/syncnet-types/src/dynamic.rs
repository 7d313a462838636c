// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Simulation Dynamic
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Phases of every oscillator at one simulation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    /// Simulation time.
    pub time: f64,
    /// Phase θ_i of each oscillator (rad).
    pub phases: Vec<f64>,
}

impl SyncSnapshot {
    pub fn new(time: f64, phases: Vec<f64>) -> Self {
        Self { time, phases }
    }
}

/// How a simulation run ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The order metric reached the requested order.
    Converged,
    /// The step budget ran out first.
    StepBudgetExhausted,
    /// The order metric stopped changing before reaching the order.
    Stalled,
}

/// Time series produced by one simulation run.
///
/// Holds either every snapshot (initial state included) or only the
/// final one, depending on whether the dynamic was collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncDynamic {
    pub snapshots: Vec<SyncSnapshot>,
    pub termination: Termination,
    /// Steps taken during the run.
    pub steps: usize,
    /// Order metric value when the run ended.
    pub order: f64,
}

impl SyncDynamic {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Final snapshot of the run.
    pub fn last(&self) -> Option<&SyncSnapshot> {
        self.snapshots.last()
    }

    /// Phases at the end of the run (empty if nothing was recorded).
    pub fn final_phases(&self) -> &[f64] {
        self.snapshots
            .last()
            .map_or(&[][..], |s| s.phases.as_slice())
    }

    /// Simulation time of the final snapshot.
    pub fn final_time(&self) -> f64 {
        self.snapshots.last().map_or(0.0, |s| s.time)
    }

    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }

    /// Phase trajectory of a single oscillator across the snapshots.
    pub fn oscillator_trace(&self, index: usize) -> Option<Vec<f64>> {
        self.snapshots
            .iter()
            .map(|s| s.phases.get(index).copied())
            .collect()
    }
}
