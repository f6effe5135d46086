//! Parallel top-k similarity search.
//!
//! This module contains the scan-and-merge pipeline:
//! - Sharded parallel scoring over a collection
//! - Per-shard bounded partial selection
//! - Deterministic merging of shard-local results
//!
//! The engine is exact: every row of the target collection is scored on
//! every query.

pub mod engine;
pub mod merger;

use serde::{Deserialize, Serialize};

/// Default number of scan workers per query.
pub const DEFAULT_WORKERS: usize = 8;

/// A scored candidate produced by the scan: a row index and its inner
/// product with the (normalized) query vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredHit {
    /// Row index in the collection.
    pub id: usize,
    /// Cosine similarity, in [-1, 1] for unit-normalized inputs.
    pub score: f32,
}

impl ScoredHit {
    /// Create a new scored hit.
    pub fn new(id: usize, score: f32) -> Self {
        Self { id, score }
    }
}

/// Configuration for the parallel similarity engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of worker threads, and the number of shards each query is
    /// split into.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}
