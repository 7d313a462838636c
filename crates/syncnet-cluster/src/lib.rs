// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Cluster Analysis
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Cluster analysis by oscillator synchronisation.
//!
//! Architecture:
//!   - distance: Euclidean helpers and input validation
//!   - radius: proximity network builder + SyncNet
//!   - hierarchy: HSyncNet, shrinking-radius re-clustering

pub mod distance;
pub mod hierarchy;
pub mod radius;

pub use distance::{
    average_neighbor_distance, distinct_pairwise_distances, euclidean_distance,
    euclidean_distance_square, validate_points,
};
pub use hierarchy::{HSyncNet, HierarchyConfig, HierarchyLevel, HierarchyResult, InitialRadius};
pub use radius::{build_radius_network, RadiusConfig, SyncNet};
