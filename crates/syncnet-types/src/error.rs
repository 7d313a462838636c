// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all SyncNet failures.
///
/// Every variant is raised synchronously at the offending call. A failed
/// construction leaves no network behind; a failed simulation is rejected
/// before the first step unless the phases themselves blow up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Unknown connection structure requested.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Grid structure requested for a non-square oscillator count.
    #[error("invalid grid size: {oscillators} oscillators do not form a square grid")]
    InvalidGridSize { oscillators: usize },

    /// Edge access beyond the oscillator count.
    #[error("index out of range: ({row}, {col}) in a network of {size} oscillators")]
    IndexOutOfRange { row: usize, col: usize, size: usize },

    /// Unknown differential-equation solver requested.
    #[error("unsupported solver: {0}")]
    UnsupportedSolver(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid input data (ragged or non-finite points).
    #[error("validation error: {0}")]
    Validation(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
