// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Dynamics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Kuramoto phase dynamics on a connectivity graph.
//!
//! Architecture:
//!   - OscillatorState: phases + natural frequencies, seeded initialisation
//!   - PhaseLaw: per-oscillator rate (Kuramoto by default)
//!   - Solver: Euler / RK4 with preallocated stage buffers
//!   - DynamicsEngine: step loop with convergence, budget and stall checks
//!   - order / ensembles: synchronisation metrics and phase grouping

pub mod engine;
pub mod ensembles;
pub mod law;
pub mod order;
pub mod oscillator;
pub mod solver;

pub use engine::{DynamicsEngine, EngineState};
pub use ensembles::{connected_ensembles, sync_ensembles};
pub use law::{KuramotoLaw, NetworkView, PhaseLaw};
pub use order::{global_order, local_order, order_series, phase_distance};
pub use oscillator::OscillatorState;
pub use solver::Solver;
