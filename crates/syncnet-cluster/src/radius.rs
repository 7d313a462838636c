// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Radius-Based Sync Network
// ─────────────────────────────────────────────────────────────────────
//! Oscillatory network over data points: oscillators i and j are
//! coupled when ‖x_i − x_j‖² ≤ r². In weighted mode every pair also
//! carries its squared distance, normalised into [0, 1] with the
//! observed minimum and maximum.
//!
//! After simulation, clusters are the connected ensembles of the
//! final phases.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use syncnet_dynamics::DynamicsEngine;
use syncnet_graph::{ConnectivityGraph, EdgeWeights, WeightMatrix};
use syncnet_types::{SimulationConfig, SolverKind, SyncDynamic, SyncError, SyncResult};

use crate::distance::{euclidean_distance_square, validate_points};

/// Construction parameters for a radius network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusConfig {
    /// Connectivity radius (same units as the points).
    pub radius: f64,
    /// Couple by normalised squared distance instead of unit weight.
    pub weighted: bool,
    pub simulation: SimulationConfig,
}

impl Default for RadiusConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            weighted: false,
            simulation: SimulationConfig::default(),
        }
    }
}

impl RadiusConfig {
    pub fn validate(&self) -> SyncResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(SyncError::Config(format!(
                "radius must be finite and >= 0, got {}",
                self.radius
            )));
        }
        self.simulation.validate()
    }
}

/// Connect every pair within `radius`; in weighted mode also return the
/// normalised squared-distance matrix over all pairs.
pub fn build_radius_network(
    points: &[Vec<f64>],
    radius: f64,
    weighted: bool,
    dense_limit: usize,
) -> SyncResult<(ConnectivityGraph, Option<WeightMatrix>)> {
    validate_points(points)?;
    let n = points.len();
    let limit = radius * radius;

    let mut graph = ConnectivityGraph::empty(n, dense_limit);
    let mut weights = weighted.then(|| WeightMatrix::new(n));
    let mut dmin = f64::INFINITY;
    let mut dmax = 0.0f64;

    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean_distance_square(&points[i], &points[j]);
            if d <= limit {
                graph.set_connection(i, j)?;
                graph.set_connection(j, i)?;
            }
            if let Some(w) = weights.as_mut() {
                w.set_symmetric(i, j, d);
                dmin = dmin.min(d);
                dmax = dmax.max(d);
            }
        }
    }

    if let Some(w) = weights.as_mut().filter(|_| n > 1) {
        let (subtractor, multiplier) = if dmax > dmin {
            (dmin, dmax - dmin)
        } else {
            log::warn!("all pairwise distances equal ({dmax}), every weight collapses to 0");
            (dmin, 1.0)
        };
        w.map_pairs(|d| (d - subtractor) / multiplier);
    }

    log::debug!(
        "radius network: {n} points, r={radius}, {} edges, weighted={weighted}",
        graph.edge_count()
    );
    Ok((graph, weights))
}

/// Sync network whose connectivity comes from point proximity.
pub struct SyncNet {
    radius: f64,
    weights: Option<Arc<WeightMatrix>>,
    engine: DynamicsEngine,
}

impl SyncNet {
    pub fn new(points: &[Vec<f64>], config: RadiusConfig) -> SyncResult<Self> {
        config.validate()?;
        let (graph, weights) = build_radius_network(
            points,
            config.radius,
            config.weighted,
            config.simulation.dense_limit,
        )?;

        let mut engine = DynamicsEngine::new(graph, config.simulation)?;
        let weights = weights.map(Arc::new);
        if let Some(w) = &weights {
            engine = engine.with_weights(Arc::clone(w) as Arc<dyn EdgeWeights>)?;
        }

        Ok(Self {
            radius: config.radius,
            weights,
            engine,
        })
    }

    /// Unweighted network with default simulation settings.
    pub fn with_radius(points: &[Vec<f64>], radius: f64) -> SyncResult<Self> {
        Self::new(
            points,
            RadiusConfig {
                radius,
                ..Default::default()
            },
        )
    }

    /// Simulate until `order` is reached or the budget runs out.
    pub fn process(
        &mut self,
        order: f64,
        solver: SolverKind,
        collect_dynamic: bool,
    ) -> SyncResult<SyncDynamic> {
        self.engine.simulate(order, solver, collect_dynamic)
    }

    /// Simulate with the settings in the simulation config.
    pub fn run(&mut self) -> SyncResult<SyncDynamic> {
        self.engine.run()
    }

    /// Connected groups of oscillators whose phases agree within the
    /// configured tolerance.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        self.clusters_within(self.engine.config().tolerance)
    }

    /// As `clusters`, with an explicit phase tolerance.
    pub fn clusters_within(&self, tolerance: f64) -> Vec<Vec<usize>> {
        self.engine.connected_ensembles(tolerance)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn weights(&self) -> Option<&WeightMatrix> {
        self.weights.as_deref()
    }

    pub fn engine(&self) -> &DynamicsEngine {
        &self.engine
    }

    pub fn size(&self) -> usize {
        self.engine.size()
    }
}
