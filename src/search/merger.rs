//! Merging of shard-local partial results into a global top-k.

use std::cmp::Ordering;

use crate::search::ScoredHit;

/// Merge shard-local partial results into the global top `k`.
///
/// Each partial is expected to already be trimmed to at most `k` hits.
/// The merged output is sorted by descending score; equal scores are
/// ordered by ascending row id. The tie-break makes the final ordering
/// independent of shard scheduling, so repeated searches return identical
/// results. If fewer than `k` candidates exist in total, all of them are
/// returned.
pub fn merge_top_k(partials: Vec<Vec<ScoredHit>>, k: usize) -> Vec<ScoredHit> {
    let mut merged: Vec<ScoredHit> = partials.into_iter().flatten().collect();

    merged.sort_unstable_by(compare_hits);
    merged.truncate(k);
    merged
}

/// Ordering used for final results: descending score, then ascending id.
fn compare_hits(a: &ScoredHit, b: &ScoredHit) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}
