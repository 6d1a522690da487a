//! Error types for the sailcloth engine.
//!
//! All crates return `SailclothResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the sailcloth engine.
#[derive(Debug, Error)]
pub enum SailclothError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A grid coordinate lies outside the point grid.
    #[error("Grid coordinate ({row}, {col}) is outside a {rows}x{columns} grid")]
    GridCoordOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated (e.g., non-finite positions).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, SailclothError>`.
pub type SailclothResult<T> = Result<T, SailclothError>;
