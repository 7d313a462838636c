// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Hierarchical Sync Clustering
// ─────────────────────────────────────────────────────────────────────
//! Re-clusters the same points at a shrinking connectivity radius:
//!
//!   r_0     = initial radius (default: largest pairwise distance)
//!   r_{k+1} = decay · r_k, shortened so no step overshoots the target
//!
//! Every level builds a fresh radius network, simulates it and extracts
//! connected ensembles. The walk stops once the cluster count reaches
//! or passes the target, once the radius is below the smallest non-zero
//! pairwise distance (the graph cannot lose further edges), or after
//! `max_levels` levels.

use serde::{Deserialize, Serialize};

use syncnet_dynamics::connected_ensembles;
use syncnet_types::{SimulationConfig, SolverKind, SyncDynamic, SyncError, SyncResult, Termination};

use crate::distance::{average_neighbor_distance, distinct_pairwise_distances, validate_points};
use crate::radius::{build_radius_network, RadiusConfig, SyncNet};

/// Where the radius schedule starts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialRadius {
    /// Largest pairwise distance: the first level is one cluster.
    #[default]
    MaxDistance,
    Fixed(f64),
    /// Mean distance to the k nearest neighbours of each point.
    NeighborAverage(usize),
}

/// Parameters of a hierarchical run. Ensemble tolerance comes from
/// `simulation.tolerance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub target_clusters: usize,
    pub initial_radius: InitialRadius,
    /// Radius multiplier per level, in (0, 1).
    pub radius_decay: f64,
    pub weighted: bool,
    pub max_levels: usize,
    pub simulation: SimulationConfig,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            target_clusters: 1,
            initial_radius: InitialRadius::MaxDistance,
            radius_decay: 0.75,
            weighted: false,
            max_levels: 64,
            simulation: SimulationConfig::default(),
        }
    }
}

impl HierarchyConfig {
    pub fn validate(&self) -> SyncResult<()> {
        if self.target_clusters == 0 {
            return Err(SyncError::Config("target_clusters must be >= 1".to_string()));
        }
        match self.initial_radius {
            InitialRadius::Fixed(r) if !r.is_finite() || r < 0.0 => {
                return Err(SyncError::Config(format!(
                    "initial radius must be finite and >= 0, got {r}"
                )));
            }
            InitialRadius::NeighborAverage(0) => {
                return Err(SyncError::Config(
                    "initial radius needs at least one neighbour".to_string(),
                ));
            }
            _ => {}
        }
        if !(self.radius_decay > 0.0 && self.radius_decay < 1.0) {
            return Err(SyncError::Config(format!(
                "radius_decay must be in (0, 1), got {}",
                self.radius_decay
            )));
        }
        if self.max_levels == 0 {
            return Err(SyncError::Config("max_levels must be >= 1".to_string()));
        }
        self.simulation.validate()
    }
}

/// Outcome of one radius level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub radius: f64,
    pub clusters: Vec<Vec<usize>>,
    pub termination: Termination,
    pub steps: usize,
}

/// All levels walked, plus the dynamic of the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyResult {
    pub levels: Vec<HierarchyLevel>,
    pub dynamic: SyncDynamic,
    /// Whether the last level holds exactly the target cluster count.
    pub reached: bool,
}

impl HierarchyResult {
    /// Clusters of the last level.
    pub fn clusters(&self) -> &[Vec<usize>] {
        self.levels.last().map_or(&[][..], |level| level.clusters.as_slice())
    }

    pub fn radii(&self) -> Vec<f64> {
        self.levels.iter().map(|level| level.radius).collect()
    }
}

/// Hierarchical sync clustering over a fixed point set.
pub struct HSyncNet {
    points: Vec<Vec<f64>>,
    cfg: HierarchyConfig,
}

impl HSyncNet {
    pub fn new(points: Vec<Vec<f64>>, config: HierarchyConfig) -> SyncResult<Self> {
        config.validate()?;
        validate_points(&points)?;
        Ok(Self {
            points,
            cfg: config,
        })
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.cfg
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Walk the radius schedule until `target_clusters` groups appear.
    pub fn process(
        &self,
        target_clusters: usize,
        order: f64,
        solver: SolverKind,
        collect_dynamic: bool,
    ) -> SyncResult<HierarchyResult> {
        let n = self.points.len();
        if target_clusters == 0 || target_clusters > n {
            return Err(SyncError::Config(format!(
                "target of {target_clusters} clusters for {n} points"
            )));
        }

        let distances = distinct_pairwise_distances(&self.points);
        let separation = distances.iter().copied().find(|&d| d > 0.0);
        let mut radius = self.initial_radius(&distances)?;
        let mut levels = Vec::new();

        loop {
            let mut net = SyncNet::new(
                &self.points,
                RadiusConfig {
                    radius,
                    weighted: self.cfg.weighted,
                    simulation: self.cfg.simulation.clone(),
                },
            )?;
            let dynamic = net.process(order, solver, collect_dynamic)?;
            let clusters = net.clusters();
            let count = clusters.len();

            log::info!(
                "hierarchy level {}: r={radius:.6}, {count} clusters, {:?} after {} steps",
                levels.len(),
                dynamic.termination,
                dynamic.steps
            );

            levels.push(HierarchyLevel {
                radius,
                clusters,
                termination: dynamic.termination,
                steps: dynamic.steps,
            });

            let reached = count == target_clusters;
            let exhausted = levels.len() >= self.cfg.max_levels;
            // below the closest distinct pair only coincident points stay linked
            let settled = separation.map_or(true, |s| radius < s);

            if count >= target_clusters || exhausted || settled {
                if !reached {
                    log::warn!(
                        "{target_clusters} clusters not reached after {} levels ({count} found)",
                        levels.len()
                    );
                }
                return Ok(HierarchyResult {
                    levels,
                    dynamic,
                    reached,
                });
            }
            radius = self.next_radius(radius, &distances, target_clusters)?;
        }
    }

    /// Run with the target and simulation settings of the config.
    pub fn run(&self) -> SyncResult<HierarchyResult> {
        let sim = &self.cfg.simulation;
        self.process(
            self.cfg.target_clusters,
            sim.order,
            sim.solver,
            sim.collect_dynamic,
        )
    }

    fn initial_radius(&self, distances: &[f64]) -> SyncResult<f64> {
        Ok(match self.cfg.initial_radius {
            InitialRadius::MaxDistance => distances.last().copied().unwrap_or(0.0),
            InitialRadius::Fixed(r) => r,
            InitialRadius::NeighborAverage(k) => average_neighbor_distance(&self.points, k)?,
        })
    }

    /// Decay step from `radius`. If the full step would split the radius
    /// graph into more than `target` components, it is shortened to the
    /// largest pairwise distance in `[r·decay, r)` that still gives at
    /// least `target`. Distances are ascending.
    fn next_radius(&self, radius: f64, distances: &[f64], target: usize) -> SyncResult<f64> {
        let next = radius * self.cfg.radius_decay;
        if self.components(next)? <= target {
            return Ok(next);
        }

        let lo = distances.partition_point(|&d| d < next);
        let hi = distances.partition_point(|&d| d < radius);
        let candidates = &distances[lo..hi];

        // component count falls as the radius grows
        let (mut left, mut right) = (0, candidates.len());
        while left < right {
            let mid = (left + right) / 2;
            if self.components(candidates[mid])? >= target {
                left = mid + 1;
            } else {
                right = mid;
            }
        }
        Ok(if left == 0 { next } else { candidates[left - 1] })
    }

    /// Connected components of the radius graph, ignoring phases.
    fn components(&self, radius: f64) -> SyncResult<usize> {
        let (graph, _) =
            build_radius_network(&self.points, radius, false, self.cfg.simulation.dense_limit)?;
        let phases = vec![0.0; graph.size()];
        Ok(connected_ensembles(&phases, &graph.neighbor_lists(), 1.0).len())
    }
}
