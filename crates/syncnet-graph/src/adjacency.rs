// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Adjacency Storage
// ─────────────────────────────────────────────────────────────────────
//! Two physical layouts for the N×N connection relation:
//!
//!   - `DenseAdjacency`: one cell per (row, col), row-major.
//!   - `BitmapAdjacency`: rows packed into `ceil(N / 64)` u64 words.
//!
//! Both own a single contiguous buffer. Index checks live in
//! `ConnectivityGraph`; the layouts assume in-range indices.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Bits per bitmap word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Which layout backs a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    Dense,
    Bitmap,
}

/// Edge query/set contract shared by both layouts.
pub trait Adjacency: Debug + Send + Sync {
    /// Number of oscillators (rows).
    fn size(&self) -> usize;

    /// Mark the directed edge `row → col`.
    fn set(&mut self, row: usize, col: usize);

    /// Whether the directed edge `row → col` exists.
    fn get(&self, row: usize, col: usize) -> bool;

    fn representation(&self) -> Representation;

    /// Storage cells per row.
    fn row_len(&self) -> usize;
}

/// Dense row-major matrix, one cell per possible neighbour.
#[derive(Debug, Clone)]
pub struct DenseAdjacency {
    n: usize,
    cells: Vec<bool>,
}

impl DenseAdjacency {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }
}

impl Adjacency for DenseAdjacency {
    fn size(&self) -> usize {
        self.n
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.n && col < self.n);
        self.cells[row * self.n + col] = true;
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.n && col < self.n);
        self.cells[row * self.n + col]
    }

    fn representation(&self) -> Representation {
        Representation::Dense
    }

    fn row_len(&self) -> usize {
        self.n
    }
}

/// Bit-packed rows for large oscillator counts.
#[derive(Debug, Clone)]
pub struct BitmapAdjacency {
    n: usize,
    words_per_row: usize,
    words: Vec<u64>,
}

impl BitmapAdjacency {
    pub fn new(n: usize) -> Self {
        let words_per_row = n.div_ceil(WORD_BITS);
        Self {
            n,
            words_per_row,
            words: vec![0; n * words_per_row],
        }
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> (usize, u64) {
        let word = row * self.words_per_row + col / WORD_BITS;
        let mask = 1u64 << (col % WORD_BITS);
        (word, mask)
    }
}

impl Adjacency for BitmapAdjacency {
    fn size(&self) -> usize {
        self.n
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.n && col < self.n);
        let (word, mask) = self.locate(row, col);
        self.words[word] |= mask;
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.n && col < self.n);
        let (word, mask) = self.locate(row, col);
        self.words[word] & mask != 0
    }

    fn representation(&self) -> Representation {
        Representation::Bitmap
    }

    fn row_len(&self) -> usize {
        self.words_per_row
    }
}

/// Pick the layout for `n` oscillators: dense up to `dense_limit`,
/// bitmap above it.
pub fn allocate(n: usize, dense_limit: usize) -> Box<dyn Adjacency> {
    if n > dense_limit {
        Box::new(BitmapAdjacency::new(n))
    } else {
        Box::new(DenseAdjacency::new(n))
    }
}
