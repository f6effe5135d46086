//! Request validation and search orchestration.
//!
//! The handler is stateless per call and independent of the transport: it
//! takes the registry and engine as plain references, so the full request
//! contract is testable without a running server.

use serde::{Deserialize, Serialize};

use crate::collection::registry::CollectionRegistry;
use crate::error::{ExascanError, Result};
use crate::search::engine::SimilarityEngine;
use crate::util::simd;

/// Number of results returned when a request omits `limit`.
pub const DEFAULT_LIMIT: usize = 5;

/// Body of a search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Ordinal of the target collection, in load order.
    #[serde(default)]
    pub collection: i64,
    /// Requested number of results; service default when absent.
    #[serde(default)]
    pub limit: Option<i64>,
    /// The query vector.
    pub vectors: QueryVectors,
}

/// A query vector, either flat or wrapped in a batch of exactly one.
///
/// The single-element batch form is accepted as a convenience for clients
/// that always submit arrays of vectors; it is unwrapped once, and larger
/// batches are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryVectors {
    /// A flat array of floats.
    Flat(Vec<f32>),
    /// An array of flat arrays.
    Nested(Vec<Vec<f32>>),
}

/// A single result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Row index in the searched collection.
    pub id: usize,
    /// Cosine similarity with the query.
    pub similarity: f32,
}

/// Body of a successful search response, ordered by descending similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<SearchHit>,
}

/// Validate a search request and run it against the registry.
///
/// Validation order, first failure wins: collection resolution, query
/// dimension (after unwrapping a batch of one), limit bounds, query
/// normalization.
pub fn handle_search(
    registry: &CollectionRegistry,
    engine: &SimilarityEngine,
    default_limit: usize,
    request: SearchRequest,
) -> Result<SearchResponse> {
    let collection = usize::try_from(request.collection)
        .ok()
        .and_then(|ordinal| registry.by_ordinal(ordinal))
        .ok_or_else(|| {
            ExascanError::unknown_collection(format!(
                "collection index {} is out of range",
                request.collection
            ))
        })?;
    let dimension = collection.dimension();

    let mut query = match request.vectors {
        QueryVectors::Flat(values) => values,
        QueryVectors::Nested(mut batch) => {
            if batch.len() == 1 && batch[0].len() == dimension {
                batch.remove(0)
            } else {
                return Err(ExascanError::dimension_mismatch(dimension, batch.len()));
            }
        }
    };
    if query.len() != dimension {
        return Err(ExascanError::dimension_mismatch(dimension, query.len()));
    }

    let limit = match request.limit {
        None => default_limit,
        Some(limit) if limit >= 1 => limit as usize,
        Some(limit) => {
            return Err(ExascanError::invalid_parameter(format!(
                "limit must be a positive integer, got {limit}"
            )));
        }
    };

    if !simd::l2_normalize(&mut query) {
        return Err(ExascanError::ZeroVector);
    }

    let hits = engine.search(collection, &query, limit);
    Ok(SearchResponse {
        data: hits
            .into_iter()
            .map(|hit| SearchHit {
                id: hit.id,
                similarity: hit.score,
            })
            .collect(),
    })
}
