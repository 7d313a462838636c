// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Oscillator Connectivity Graph
// ─────────────────────────────────────────────────────────────────────
//! N×N directed connection relation between oscillators, with builders
//! for the canonical topologies.
//!
//! Builders set both directions of every edge and never create
//! self-loops. Grid topologies lay oscillators out row-major on a
//! `side × side` square and never wrap across row boundaries.

use syncnet_types::config::MAX_DENSE_OSCILLATORS;
use syncnet_types::{SyncError, SyncResult, Topology};

use crate::adjacency::{allocate, Adjacency, Representation};

/// Connection structure of an oscillatory network.
#[derive(Debug)]
pub struct ConnectivityGraph {
    storage: Box<dyn Adjacency>,
}

impl ConnectivityGraph {
    /// Build a graph of `n` oscillators wired with `topology`.
    pub fn new(n: usize, topology: Topology) -> SyncResult<Self> {
        Self::with_dense_limit(n, topology, MAX_DENSE_OSCILLATORS)
    }

    /// As `new`, with an explicit dense/bitmap switch threshold.
    pub fn with_dense_limit(n: usize, topology: Topology, dense_limit: usize) -> SyncResult<Self> {
        let mut graph = Self::empty(n, dense_limit);
        graph.create_structure(topology)?;
        log::debug!(
            "connectivity graph: n={n} topology={topology} representation={:?} edges={}",
            graph.representation(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Graph with no connections; callers add edges with `set_connection`.
    pub fn empty(n: usize, dense_limit: usize) -> Self {
        Self {
            storage: allocate(n, dense_limit),
        }
    }

    /// Parse `topology` by name, failing with `InvalidTopology`.
    pub fn from_name(n: usize, topology: &str) -> SyncResult<Self> {
        Self::new(n, topology.parse()?)
    }

    /// Number of oscillators.
    pub fn size(&self) -> usize {
        self.storage.size()
    }

    pub fn representation(&self) -> Representation {
        self.storage.representation()
    }

    fn check(&self, row: usize, col: usize) -> SyncResult<()> {
        let size = self.size();
        if row >= size || col >= size {
            return Err(SyncError::IndexOutOfRange { row, col, size });
        }
        Ok(())
    }

    /// Mark the directed edge `row → col`.
    pub fn set_connection(&mut self, row: usize, col: usize) -> SyncResult<()> {
        self.check(row, col)?;
        self.storage.set(row, col);
        Ok(())
    }

    /// Whether the directed edge `row → col` exists.
    pub fn get_connection(&self, row: usize, col: usize) -> SyncResult<bool> {
        self.check(row, col)?;
        Ok(self.storage.get(row, col))
    }

    /// Neighbours of `index` in ascending order.
    pub fn neighbors(&self, index: usize) -> SyncResult<Vec<usize>> {
        self.check(index, index)?;
        Ok(self.row_neighbors(index))
    }

    fn row_neighbors(&self, index: usize) -> Vec<usize> {
        (0..self.size())
            .filter(|&j| self.storage.get(index, j))
            .collect()
    }

    /// Ascending neighbour list of every oscillator.
    pub fn neighbor_lists(&self) -> Vec<Vec<usize>> {
        (0..self.size()).map(|i| self.row_neighbors(i)).collect()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        let n = self.size();
        (0..n)
            .map(|i| (0..n).filter(|&j| self.storage.get(i, j)).count())
            .sum()
    }

    /// Whether every edge has its reverse.
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| ((i + 1)..n).all(|j| self.storage.get(i, j) == self.storage.get(j, i)))
    }

    // ------------------------------------------------------------------
    // Topology builders
    // ------------------------------------------------------------------

    fn create_structure(&mut self, topology: Topology) -> SyncResult<()> {
        match topology {
            Topology::None => {}
            Topology::AllToAll => self.create_all_to_all(),
            Topology::ListBidir => self.create_list_bidir(),
            Topology::GridFour => self.create_grid_four()?,
            Topology::GridEight => self.create_grid_eight()?,
        }
        Ok(())
    }

    fn connect_pair(&mut self, a: usize, b: usize) {
        self.storage.set(a, b);
        self.storage.set(b, a);
    }

    fn create_all_to_all(&mut self) {
        let n = self.size();
        for row in 0..n {
            for col in (row + 1)..n {
                self.connect_pair(row, col);
            }
        }
    }

    fn create_list_bidir(&mut self) {
        for index in 1..self.size() {
            self.connect_pair(index - 1, index);
        }
    }

    fn grid_side(&self) -> SyncResult<usize> {
        let n = self.size();
        let side = (n as f64).sqrt().round() as usize;
        if side * side != n {
            return Err(SyncError::InvalidGridSize { oscillators: n });
        }
        Ok(side)
    }

    fn create_grid_four(&mut self) -> SyncResult<()> {
        let n = self.size();
        let side = self.grid_side()?;

        for index in 0..n {
            let row = index / side;

            if index >= side {
                self.storage.set(index, index - side);
            }
            if index + side < n {
                self.storage.set(index, index + side);
            }
            if index >= 1 && (index - 1) / side == row {
                self.storage.set(index, index - 1);
            }
            if index + 1 < n && (index + 1) / side == row {
                self.storage.set(index, index + 1);
            }
        }
        Ok(())
    }

    fn create_grid_eight(&mut self) -> SyncResult<()> {
        self.create_grid_four()?;

        let n = self.size();
        let side = self.grid_side()?;

        for index in 0..n {
            let row = index / side;

            // Upper diagonals must land on the row directly above.
            if row >= 1 {
                let upper = index - side;
                if upper >= 1 && (upper - 1) / side == row - 1 {
                    self.storage.set(index, upper - 1);
                }
                if (upper + 1) / side == row - 1 {
                    self.storage.set(index, upper + 1);
                }
            }

            // Lower diagonals must land on the row directly below.
            let lower = index + side;
            if lower < n {
                if (lower - 1) / side == row + 1 {
                    self.storage.set(index, lower - 1);
                }
                if lower + 1 < n && (lower + 1) / side == row + 1 {
                    self.storage.set(index, lower + 1);
                }
            }
        }
        Ok(())
    }
}
