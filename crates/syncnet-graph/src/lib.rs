// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Connectivity
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Connectivity graph for oscillatory networks.
//!
//! Architecture:
//!   - Adjacency: dense matrix or packed bitmap, picked by oscillator count
//!   - ConnectivityGraph: index-checked edge API + canonical topologies
//!   - EdgeWeights: unit or matrix coupling strengths

pub mod adjacency;
pub mod graph;
pub mod weights;

pub use adjacency::{Adjacency, BitmapAdjacency, DenseAdjacency, Representation, WORD_BITS};
pub use graph::ConnectivityGraph;
pub use weights::{EdgeWeights, UnitWeights, WeightMatrix};
