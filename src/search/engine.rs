//! Sharded parallel scan engine.

use std::ops::Range;

use rayon::prelude::*;

use crate::collection::VectorCollection;
use crate::error::{ExascanError, Result};
use crate::search::merger::merge_top_k;
use crate::search::{EngineConfig, ScoredHit};
use crate::util::simd;

/// Exact top-k similarity search over a collection, parallelized across a
/// fixed-size worker pool.
///
/// The pool is created once, at engine construction, and reused by every
/// query; each query fans out one scan task per shard and joins all of
/// them before merging, so results never depend on scheduling order.
pub struct SimilarityEngine {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl SimilarityEngine {
    /// Create a new engine with a dedicated pool of `config.workers`
    /// threads.
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.workers == 0 {
            return Err(ExascanError::invalid_parameter(
                "worker count must be at least one",
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()
            .map_err(|e| ExascanError::other(format!("failed to create thread pool: {e}")))?;

        Ok(Self {
            pool,
            workers: config.workers,
        })
    }

    /// Create a new engine with the given worker count.
    pub fn with_workers(workers: usize) -> Result<Self> {
        Self::new(EngineConfig { workers })
    }

    /// Number of workers (and per-query shards).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Compute the top `k` rows of `collection` by inner product with
    /// `query`, sorted by descending score with ascending-id tie-break.
    ///
    /// The caller is responsible for validation: `query` must have the
    /// collection's dimension and unit norm, and `k` must be at least 1.
    /// A `k` larger than the collection returns every row, sorted.
    pub fn search(&self, collection: &VectorCollection, query: &[f32], k: usize) -> Vec<ScoredHit> {
        debug_assert_eq!(query.len(), collection.dimension());
        debug_assert!(k >= 1);

        let shards = shard_ranges(collection.len(), self.workers);

        // Ordered parallel map: one task per shard, joined before merging.
        let partials: Vec<Vec<ScoredHit>> = self.pool.install(|| {
            shards
                .into_par_iter()
                .map(|shard| scan_shard(collection, query, shard, k))
                .collect()
        });

        merge_top_k(partials, k)
    }
}

/// Split `[0, count)` into `workers` contiguous ranges.
///
/// Every range spans `count / workers` rows except the last, which absorbs
/// the remainder. The union covers each row exactly once; when `workers`
/// exceeds `count`, the excess leading ranges are empty.
fn shard_ranges(count: usize, workers: usize) -> Vec<Range<usize>> {
    let chunk = count / workers;
    (0..workers)
        .map(|t| {
            let start = t * chunk;
            let end = if t == workers - 1 { count } else { start + chunk };
            start..end
        })
        .collect()
}

/// Score every row in `shard` against `query` and keep the local top
/// `min(k, shard_len)` by partial selection.
fn scan_shard(
    collection: &VectorCollection,
    query: &[f32],
    shard: Range<usize>,
    k: usize,
) -> Vec<ScoredHit> {
    let mut local: Vec<ScoredHit> = Vec::with_capacity(shard.len());
    for id in shard {
        local.push(ScoredHit::new(id, simd::dot(query, collection.row(id))));
    }

    // Partial selection bounds per-shard work; the merge step applies the
    // final ordering and tie-break.
    if local.len() > k {
        local.select_nth_unstable_by(k, |a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        local.truncate(k);
    }
    local
}
