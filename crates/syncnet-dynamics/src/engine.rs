// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Oscillatory Dynamics Engine
// ─────────────────────────────────────────────────────────────────────
//! Drives the phase equations of one network forward in time:
//!
//!   Idle → Integrating → Finished(Converged | StepBudgetExhausted | Stalled)
//!
//! Each step advances every phase by `step` (split into `substeps`)
//! with the selected solver, then re-evaluates the order metric. The
//! run ends once the metric reaches the requested order or the step
//! budget runs out. Neither outcome is an error.
//!
//! The engine owns its graph, weights and phases outright. Neighbour
//! lists are computed once at construction; the graph is immutable
//! afterwards.

use std::sync::Arc;

use syncnet_graph::{ConnectivityGraph, EdgeWeights, UnitWeights};
use syncnet_types::{
    OrderMetric, SimulationConfig, SolverKind, SyncDynamic, SyncError, SyncResult, SyncSnapshot,
    Termination, Topology,
};

use crate::ensembles::{connected_ensembles, sync_ensembles};
use crate::law::{KuramotoLaw, NetworkView, PhaseLaw};
use crate::order::{global_order, local_order};
use crate::oscillator::OscillatorState;
use crate::solver::Solver;

/// Lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Integrating,
    Finished(Termination),
}

/// Oscillatory network simulator.
pub struct DynamicsEngine {
    cfg: SimulationConfig,
    graph: ConnectivityGraph,
    neighbors: Vec<Vec<usize>>,
    weights: Arc<dyn EdgeWeights>,
    law: Box<dyn PhaseLaw>,
    oscillators: OscillatorState,
    /// Phases before the step in flight, restored if it blows up.
    rollback: Vec<f64>,
    time: f64,
    step_count: usize,
    state: EngineState,
}

impl DynamicsEngine {
    /// Engine over `graph` with Kuramoto coupling, unit edge weights and
    /// initial phases drawn per `config`.
    pub fn new(graph: ConnectivityGraph, config: SimulationConfig) -> SyncResult<Self> {
        config.validate()?;
        let oscillators = OscillatorState::from_config(graph.size(), &config)?;
        let neighbors = graph.neighbor_lists();
        Ok(Self {
            law: Box::new(KuramotoLaw::new(config.coupling)),
            weights: Arc::new(UnitWeights),
            cfg: config,
            graph,
            neighbors,
            oscillators,
            rollback: Vec::new(),
            time: 0.0,
            step_count: 0,
            state: EngineState::Idle,
        })
    }

    /// Engine over `n` oscillators wired with a canonical topology.
    pub fn with_topology(n: usize, topology: Topology, config: SimulationConfig) -> SyncResult<Self> {
        let graph = ConnectivityGraph::with_dense_limit(n, topology, config.dense_limit)?;
        Self::new(graph, config)
    }

    pub fn default_params(n: usize, topology: Topology) -> SyncResult<Self> {
        Self::with_topology(n, topology, SimulationConfig::default())
    }

    /// Replace the edge weights. A sized weight source must match the
    /// oscillator count.
    pub fn with_weights(mut self, weights: Arc<dyn EdgeWeights>) -> SyncResult<Self> {
        if let Some(size) = weights.dimension() {
            if size != self.size() {
                return Err(SyncError::Validation(format!(
                    "weight matrix of size {size} for {} oscillators",
                    self.size()
                )));
            }
        }
        self.weights = weights;
        Ok(self)
    }

    /// Replace the phase-update law.
    pub fn with_law(mut self, law: Box<dyn PhaseLaw>) -> Self {
        self.law = law;
        self
    }

    /// Replace the oscillator state (phases and natural frequencies).
    pub fn with_state(mut self, oscillators: OscillatorState) -> SyncResult<Self> {
        if oscillators.len() != self.size() {
            return Err(SyncError::Validation(format!(
                "{} oscillator states for a network of {}",
                oscillators.len(),
                self.size()
            )));
        }
        self.oscillators = oscillators;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn size(&self) -> usize {
        self.graph.size()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.cfg
    }

    pub fn graph(&self) -> &ConnectivityGraph {
        &self.graph
    }

    pub fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }

    pub fn phases(&self) -> &[f64] {
        &self.oscillators.phases
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.oscillators.frequencies
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken over the engine's lifetime.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Global order parameter R of the current phases.
    pub fn order_parameter(&self) -> f64 {
        global_order(&self.oscillators.phases)
    }

    /// Local (edge-wise) order of the current phases.
    pub fn local_order_parameter(&self) -> f64 {
        local_order(&self.oscillators.phases, &self.neighbors)
    }

    fn order_metric(&self) -> f64 {
        match self.cfg.order_metric {
            OrderMetric::Global => self.order_parameter(),
            OrderMetric::Local => self.local_order_parameter(),
        }
    }

    /// Phase-only ensembles of the current phases.
    pub fn sync_ensembles(&self, tolerance: f64) -> Vec<Vec<usize>> {
        sync_ensembles(&self.oscillators.phases, tolerance)
    }

    /// Ensembles joined along edges of near-equal phase.
    pub fn connected_ensembles(&self, tolerance: f64) -> Vec<Vec<usize>> {
        connected_ensembles(&self.oscillators.phases, &self.neighbors, tolerance)
    }

    fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot::new(self.time, self.oscillators.phases.clone())
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Simulate until the order metric reaches `order` or the step
    /// budget is spent.
    ///
    /// With `collect_dynamic` the result holds every snapshot, initial
    /// state included (steps + 1 entries); otherwise only the final one.
    pub fn simulate(
        &mut self,
        order: f64,
        solver: SolverKind,
        collect_dynamic: bool,
    ) -> SyncResult<SyncDynamic> {
        self.integrate(Some(order), self.cfg.max_steps, solver, collect_dynamic)
    }

    /// As `simulate`, resolving the solver by name first. An unknown
    /// name fails with `UnsupportedSolver` before any stepping.
    pub fn simulate_named(
        &mut self,
        order: f64,
        solver: &str,
        collect_dynamic: bool,
    ) -> SyncResult<SyncDynamic> {
        let kind: SolverKind = solver.parse()?;
        self.simulate(order, kind, collect_dynamic)
    }

    /// Advance exactly `steps` steps regardless of the order reached.
    pub fn simulate_static(
        &mut self,
        steps: usize,
        solver: SolverKind,
        collect_dynamic: bool,
    ) -> SyncResult<SyncDynamic> {
        self.integrate(None, steps, solver, collect_dynamic)
    }

    /// Simulate with the order, solver and collection flag of the config.
    pub fn run(&mut self) -> SyncResult<SyncDynamic> {
        let (order, solver, collect) = (self.cfg.order, self.cfg.solver, self.cfg.collect_dynamic);
        self.simulate(order, solver, collect)
    }

    fn integrate(
        &mut self,
        order: Option<f64>,
        budget: usize,
        kind: SolverKind,
        collect_dynamic: bool,
    ) -> SyncResult<SyncDynamic> {
        let mut solver = Solver::new(kind, self.size());
        self.state = EngineState::Integrating;

        let mut snapshots = Vec::new();
        if collect_dynamic {
            snapshots.push(self.snapshot());
        }

        let mut current = self.order_metric();
        let mut steps = 0usize;

        let termination = loop {
            if let Some(target) = order {
                if current >= target {
                    break Termination::Converged;
                }
            }
            if steps >= budget {
                break Termination::StepBudgetExhausted;
            }

            if let Err(e) = self.advance(&mut solver) {
                self.state = EngineState::Idle;
                return Err(e);
            }
            steps += 1;
            if collect_dynamic {
                snapshots.push(self.snapshot());
            }

            let previous = current;
            current = self.order_metric();

            if let (Some(target), Some(threshold)) = (order, self.cfg.stall_threshold) {
                if current < target && (current - previous).abs() < threshold {
                    break Termination::Stalled;
                }
            }
        };

        if !collect_dynamic {
            snapshots.push(self.snapshot());
        }
        self.state = EngineState::Finished(termination);

        log::debug!(
            "simulation finished: {termination:?} after {steps} steps, t={:.4}, order={current:.6}, solver={kind}",
            self.time
        );
        if let (Some(target), Termination::StepBudgetExhausted) = (order, termination) {
            log::warn!("order {target:.6} not reached within {budget} steps (reached {current:.6})");
        }

        Ok(SyncDynamic {
            snapshots,
            termination,
            steps,
            order: current,
        })
    }

    /// One recorded step: `substeps` solver calls of `step / substeps`.
    /// A non-finite result restores the phases and leaves time untouched.
    fn advance(&mut self, solver: &mut Solver) -> SyncResult<()> {
        self.rollback.clear();
        self.rollback.extend_from_slice(&self.oscillators.phases);

        let h = self.cfg.step / self.cfg.substeps as f64;
        let law = &*self.law;
        let view = NetworkView {
            neighbors: &self.neighbors,
            weights: &*self.weights,
            frequencies: &self.oscillators.frequencies,
        };
        let phases = &mut self.oscillators.phases;

        for _ in 0..self.cfg.substeps {
            solver.step(phases, h, |y, out| law.rates(y, &view, out));
        }

        if let Some(i) = self.oscillators.phases.iter().position(|th| !th.is_finite()) {
            self.oscillators.phases.copy_from_slice(&self.rollback);
            return Err(SyncError::Numerical(format!(
                "phase of oscillator {i} became non-finite at t={:.4}",
                self.time + self.cfg.step
            )));
        }

        self.time += self.cfg.step;
        self.step_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use syncnet_graph::WeightMatrix;
    use syncnet_types::InitialPhases;

    fn make_engine(n: usize, topology: Topology, config: SimulationConfig) -> DynamicsEngine {
        DynamicsEngine::with_topology(n, topology, config).unwrap()
    }

    fn pair(phases: [f64; 2], config: SimulationConfig) -> DynamicsEngine {
        make_engine(2, Topology::ListBidir, config)
            .with_state(OscillatorState::new(phases.to_vec()).unwrap())
            .unwrap()
    }

    #[test]
    fn test_engine_init() {
        let engine = DynamicsEngine::default_params(9, Topology::GridFour).unwrap();
        assert_eq!(engine.size(), 9);
        assert_eq!(engine.phases().len(), 9);
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.step_count(), 0);
        assert_eq!(engine.neighbors()[4], vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = SimulationConfig {
            step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            DynamicsEngine::with_topology(4, Topology::AllToAll, cfg),
            Err(SyncError::Config(_))
        ));
    }

    #[test]
    fn test_grid_size_error_propagates() {
        assert_eq!(
            DynamicsEngine::default_params(7, Topology::GridEight).err(),
            Some(SyncError::InvalidGridSize { oscillators: 7 })
        );
    }

    #[test]
    fn test_order_near_zero_converges_immediately() {
        let mut engine = DynamicsEngine::default_params(8, Topology::AllToAll).unwrap();
        let dynamic = engine.simulate(1e-12, SolverKind::Euler, false).unwrap();
        assert_eq!(dynamic.termination, Termination::Converged);
        assert!(dynamic.steps <= 1);
        assert_eq!(engine.state(), EngineState::Finished(Termination::Converged));
    }

    #[test]
    fn test_unreachable_order_exhausts_budget() {
        let cfg = SimulationConfig {
            max_steps: 50,
            ..Default::default()
        };
        let mut engine = make_engine(6, Topology::AllToAll, cfg);
        let dynamic = engine.simulate(1.5, SolverKind::Rk4, false).unwrap();
        assert_eq!(dynamic.termination, Termination::StepBudgetExhausted);
        assert_eq!(dynamic.steps, 50);
        assert_eq!(dynamic.len(), 1);
        assert!((engine.time() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_collect_dynamic_matches_final_snapshot() {
        let cfg = SimulationConfig {
            seed: 7,
            max_steps: 40,
            ..Default::default()
        };
        let mut collected = make_engine(16, Topology::GridEight, cfg.clone());
        let mut last_only = make_engine(16, Topology::GridEight, cfg);

        let full = collected.simulate(0.999, SolverKind::Euler, true).unwrap();
        let last = last_only.simulate(0.999, SolverKind::Euler, false).unwrap();

        assert_eq!(full.len(), full.steps + 1);
        assert_eq!(last.len(), 1);
        assert_eq!(full.steps, last.steps);
        assert_eq!(full.final_phases(), last.final_phases());
        assert_eq!(full.snapshots[0].time, 0.0);
        // recorded times increase by one step each
        for w in full.snapshots.windows(2) {
            assert!((w[1].time - w[0].time - 0.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pair_synchronises_to_mean() {
        let mut engine = pair([0.0, 1.0], SimulationConfig::default());
        let dynamic = engine.simulate(0.99999, SolverKind::Euler, false).unwrap();
        assert!(dynamic.converged());
        let phases = dynamic.final_phases();
        assert!((phases[0] - phases[1]).abs() < 0.01);
        // symmetric coupling conserves the mean phase
        assert!((phases[0] + phases[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rk4_tracks_pair_solution() {
        // d = θ_1 - θ_0 obeys d' = -2 sin d: tan(d/2) = tan(d0/2) e^{-2t}
        let cfg = SimulationConfig {
            step: 0.05,
            ..Default::default()
        };
        let exact = 2.0 * ((0.5f64).tan() * (-2.0f64).exp()).atan();

        let mut euler = pair([0.0, 1.0], cfg.clone());
        let mut rk4 = pair([0.0, 1.0], cfg);
        let de = euler.simulate_static(20, SolverKind::Euler, false).unwrap();
        let dr = rk4.simulate_static(20, SolverKind::Rk4, false).unwrap();

        let err = |d: &SyncDynamic| (d.final_phases()[1] - d.final_phases()[0] - exact).abs();
        assert!(err(&dr) < 1e-5, "rk4 error {}", err(&dr));
        assert!(err(&dr) < err(&de));
    }

    #[test]
    fn test_substeps_refine_euler() {
        let exact = 2.0 * ((0.5f64).tan() * (-2.0f64).exp()).atan();
        let coarse_cfg = SimulationConfig::default();
        let fine_cfg = SimulationConfig {
            substeps: 10,
            ..Default::default()
        };
        let coarse = pair([0.0, 1.0], coarse_cfg)
            .simulate_static(10, SolverKind::Euler, false)
            .unwrap();
        let fine = pair([0.0, 1.0], fine_cfg)
            .simulate_static(10, SolverKind::Euler, false)
            .unwrap();
        let err = |d: &SyncDynamic| (d.final_phases()[1] - d.final_phases()[0] - exact).abs();
        assert!(err(&fine) < err(&coarse));
        assert!((fine.final_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncoupled_phases_follow_natural_frequency() {
        let mut engine = make_engine(2, Topology::None, SimulationConfig::default())
            .with_state(OscillatorState::with_frequencies(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap())
            .unwrap();
        let dynamic = engine.simulate_static(10, SolverKind::Euler, false).unwrap();
        let phases = dynamic.final_phases();
        assert!((phases[0] - 1.0).abs() < 1e-9);
        assert!((phases[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_coupling_keeps_phases() {
        let mut engine = make_engine(5, Topology::None, SimulationConfig::default());
        let before = engine.phases().to_vec();
        engine.simulate_static(25, SolverKind::Rk4, false).unwrap();
        assert_eq!(engine.phases(), before.as_slice());
    }

    #[test]
    fn test_zero_weights_freeze_network() {
        let engine = make_engine(4, Topology::AllToAll, SimulationConfig::default());
        let before = engine.phases().to_vec();
        let mut engine = engine
            .with_weights(Arc::new(WeightMatrix::new(4)))
            .unwrap();
        engine.simulate_static(10, SolverKind::Euler, false).unwrap();
        assert_eq!(engine.phases(), before.as_slice());
    }

    #[test]
    fn test_weight_size_mismatch() {
        let engine = make_engine(4, Topology::AllToAll, SimulationConfig::default());
        assert!(engine
            .with_weights(Arc::new(WeightMatrix::new(3)))
            .is_err());
    }

    #[test]
    fn test_stall_detection() {
        let cfg = SimulationConfig {
            stall_threshold: Some(1e-9),
            ..Default::default()
        };
        let mut engine = pair([0.3, 0.3], cfg);
        let dynamic = engine.simulate(1.5, SolverKind::Euler, false).unwrap();
        assert_eq!(dynamic.termination, Termination::Stalled);
        assert_eq!(dynamic.steps, 1);
    }

    #[test]
    fn test_unsupported_solver_before_stepping() {
        let mut engine = DynamicsEngine::default_params(4, Topology::AllToAll).unwrap();
        let before = engine.phases().to_vec();
        assert_eq!(
            engine.simulate_named(0.99, "rkf45", false).err(),
            Some(SyncError::UnsupportedSolver("rkf45".to_string()))
        );
        assert_eq!(engine.phases(), before.as_slice());
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.simulate_named(0.99, "rk4", false).is_ok());
    }

    struct Exploding;

    impl PhaseLaw for Exploding {
        fn rate(&self, _index: usize, _phases: &[f64], _view: &NetworkView<'_>) -> f64 {
            f64::INFINITY
        }
    }

    #[test]
    fn test_non_finite_phase_fails_run() {
        let mut engine = make_engine(3, Topology::ListBidir, SimulationConfig::default())
            .with_law(Box::new(Exploding));
        assert!(matches!(
            engine.simulate(0.99, SolverKind::Euler, false),
            Err(SyncError::Numerical(_))
        ));
    }

    #[test]
    fn test_non_finite_step_rolls_back() {
        let engine = make_engine(3, Topology::ListBidir, SimulationConfig::default());
        let before = engine.phases().to_vec();
        let mut engine = engine.with_law(Box::new(Exploding));

        assert!(engine.simulate_static(5, SolverKind::Rk4, true).is_err());
        assert_eq!(engine.phases(), before.as_slice());
        assert_eq!(engine.time(), 0.0);
        assert_eq!(engine.step_count(), 0);
        assert_eq!(engine.state(), EngineState::Idle);

        // same engine keeps working once the law is sane again
        let mut engine = engine.with_law(Box::new(KuramotoLaw::default()));
        let dynamic = engine.simulate_static(3, SolverKind::Euler, false).unwrap();
        assert_eq!(dynamic.steps, 3);
        assert!((engine.time() - 0.3).abs() < 1e-9);
        assert!(engine.phases().iter().all(|th| th.is_finite()));
    }

    #[test]
    fn test_local_metric_grid_converges() {
        let cfg = SimulationConfig {
            initial_phases: InitialPhases::Equipartition,
            order_metric: OrderMetric::Local,
            ..Default::default()
        };
        let mut engine = make_engine(16, Topology::GridFour, cfg);
        let dynamic = engine.run().unwrap();
        assert!(dynamic.converged());
        assert!(engine.local_order_parameter() >= 0.998);
    }

    #[test]
    fn test_grid_equipartition_synchronises() {
        let cfg = SimulationConfig {
            initial_phases: InitialPhases::Equipartition,
            solver: SolverKind::Rk4,
            order: 0.99,
            ..Default::default()
        };
        let mut engine = make_engine(16, Topology::GridFour, cfg);
        assert!(engine.order_parameter() < 0.99);
        let dynamic = engine.run().unwrap();
        assert!(dynamic.converged());
        assert!(dynamic.order >= 0.99);
        assert!(engine.phases().iter().all(|&th| (0.0..PI).contains(&th)));
    }

    #[test]
    fn test_ensembles_after_sync() {
        let mut engine = pair([0.0, 0.8], SimulationConfig::default());
        engine.simulate(0.9999999, SolverKind::Rk4, false).unwrap();
        assert_eq!(engine.sync_ensembles(0.01), vec![vec![0, 1]]);
        assert_eq!(engine.connected_ensembles(0.01), vec![vec![0, 1]]);
    }

    #[test]
    fn test_simulate_continues_from_current_state() {
        let mut engine = pair([0.0, 1.0], SimulationConfig::default());
        engine.simulate_static(5, SolverKind::Euler, false).unwrap();
        let dynamic = engine.simulate_static(5, SolverKind::Euler, true).unwrap();
        assert!((dynamic.snapshots[0].time - 0.5).abs() < 1e-9);
        assert_eq!(engine.step_count(), 10);
    }
}
