// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for SyncNet —
//! the oscillatory-network engine behind sync-based cluster analysis.

pub mod config;
pub mod dynamic;
pub mod error;

pub use config::{InitialPhases, OrderMetric, SimulationConfig, SolverKind, Topology};
pub use dynamic::{SyncDynamic, SyncSnapshot, Termination};
pub use error::{SyncError, SyncResult};
