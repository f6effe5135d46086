//! HTTP interface for the search service.
//!
//! Exposes the search engine over HTTP using axum.
//!
//! # Endpoints
//!
//! - `GET /` - List the loaded collection names
//! - `POST /` - Run a top-k similarity search
//!
//! All request-time failures produce a `400` response with an
//! `{"error": ...}` body and never affect other in-flight requests.

pub mod handler;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::collection::registry::CollectionRegistry;
use crate::error::ExascanError;
use crate::search::engine::SimilarityEngine;
use crate::server::handler::{SearchRequest, SearchResponse};

/// Shared application state.
///
/// Everything in here is constructed once at startup and read-only
/// afterward, so concurrent requests share it without locking.
pub struct AppState {
    pub registry: CollectionRegistry,
    pub engine: SimilarityEngine,
    pub default_limit: usize,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper mapping request-time errors onto the response contract.
struct ApiError(ExascanError);

impl From<ExascanError> for ApiError {
    fn from(error: ExascanError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// GET / - List the loaded collection names.
async fn list_collections(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.registry.names())
}

/// POST / - Run a search.
async fn search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let request: SearchRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError(ExascanError::malformed_request(e.to_string())))?;

    let response = handler::handle_search(
        &state.registry,
        &state.engine,
        state.default_limit,
        request,
    )
    .map_err(|e| {
        log::debug!("search request rejected: {e}");
        ApiError(e)
    })?;

    Ok(Json(response))
}

/// Create the axum router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(list_collections).post(search))
        .layer(cors)
        .with_state(state)
}

/// Start the server.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let router = create_router(state);

    log::info!("serving on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
