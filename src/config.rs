// In: src/config.rs

//! The single source of truth for all kolom engine configuration.
//!
//! This module defines the unified `EngineConfig` struct, which is designed to
//! be created once at the application boundary (e.g., from a user's JSON file)
//! and then handed to `Table::with_config`. Every knob has a default matching
//! the engine's original fixed constants, so `Table::new` behaves identically
//! to a zero-configuration build.

use serde::{Deserialize, Serialize};

use crate::error::KolomError;

/// The maximum number of packed rows per chunk. Chosen so per-chunk row
/// indices and column byte offsets fit index arithmetic without overflow.
pub const DEFAULT_CHUNK_ROWS: usize = 256 * 256;

/// Number of scan workers in the histogram pool.
pub const DEFAULT_WORKER_THREADS: usize = 8;

/// Capacity of the bounded chunk work queue. A full queue applies
/// backpressure against a producer that outruns the workers.
pub const DEFAULT_QUEUE_DEPTH: usize = 4;

/// Engine-wide tuning knobs for table layout and the histogram scan pool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum packed rows per chunk. The chunk is the unit of parallel scan;
    /// the last chunk of a table may be partially filled.
    #[serde(default = "default_chunk_rows")]
    pub chunk_rows: usize,

    /// Fixed size of the histogram worker pool, independent of chunk count.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Capacity of the bounded queue feeding chunk iterators to the pool.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

fn default_chunk_rows() -> usize {
    DEFAULT_CHUNK_ROWS
}

fn default_worker_threads() -> usize {
    DEFAULT_WORKER_THREADS
}

fn default_queue_depth() -> usize {
    DEFAULT_QUEUE_DEPTH
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_rows: DEFAULT_CHUNK_ROWS,
            worker_threads: DEFAULT_WORKER_THREADS,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON document. Missing fields fall back
    /// to the engine defaults.
    pub fn from_json(json: &str) -> Result<Self, KolomError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Clamps degenerate values (zero rows per chunk, an empty pool, a
    /// zero-capacity queue) up to 1 so a hand-built config cannot stall the
    /// engine.
    pub(crate) fn sanitized(&self) -> Self {
        Self {
            chunk_rows: self.chunk_rows.max(1),
            worker_threads: self.worker_threads.max(1),
            queue_depth: self.queue_depth.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_engine_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.chunk_rows, 65536);
        assert_eq!(config.worker_threads, 8);
        assert_eq!(config.queue_depth, 4);
    }

    #[test]
    fn test_from_json_partial_fields() {
        let config = EngineConfig::from_json(r#"{ "worker_threads": 2 }"#).unwrap();
        assert_eq!(config.worker_threads, 2);
        assert_eq!(config.chunk_rows, DEFAULT_CHUNK_ROWS);
        assert_eq!(config.queue_depth, DEFAULT_QUEUE_DEPTH);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_sanitized_clamps_zeroes() {
        let config = EngineConfig {
            chunk_rows: 0,
            worker_threads: 0,
            queue_depth: 0,
        };
        let sane = config.sanitized();
        assert_eq!(sane.chunk_rows, 1);
        assert_eq!(sane.worker_threads, 1);
        assert_eq!(sane.queue_depth, 1);
    }
}
