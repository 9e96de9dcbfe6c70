//! This module defines the single, unified error type for the entire kolom library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KolomError {
    // =========================================================================
    // === Table Construction Errors (fatal; no partial table is returned)
    // =========================================================================
    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(u32),

    #[error("Row count mismatch: column {column} has {got} rows, expected {expected}")]
    RowCountMismatch {
        column: u32,
        got: usize,
        expected: usize,
    },

    #[error("Malformed column {0}: {1}")]
    MalformedColumn(u32, String),

    // =========================================================================
    // === Histogram Query Errors (fatal to the single call; caller re-issues)
    // =========================================================================
    #[error("Bins have to be sorted: {0:?}")]
    BinsNotSorted(Vec<u64>),

    #[error("Need at least 2 bin boundaries, got {0}")]
    InsufficientBins(usize),

    #[error("Column not found: {0}")]
    ColumnNotFound(u32),

    #[error("Column width {0} exceeds 8 bytes; packed values must fit a u64")]
    UnsupportedColumnWidth(usize),

    #[error("Histogram worker panicked: {0}")]
    WorkerPanic(String),

    // =========================================================================
    // === Dictionary Errors
    // =========================================================================
    #[error("Dictionary decode failed: {0}")]
    UnknownCode(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An error from the Serde JSON library, typically during config parsing.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
