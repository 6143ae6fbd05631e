//! Storage API Routes
//!
//! - POST /api/storage/decompose - Split a URI into bucket and object key
//! - POST /api/storage/signed-url - Issue a one hour read link
//! - POST /api/storage/containers - Ensure the URI's bucket exists
//! - POST /api/storage/copy - Copy an object into the team bucket
//! - POST /api/storage/download - Fetch an object as base64
//!
//! Gateway failures are answered with `200 OK` and an `{ "error": ... }`
//! body; clients tell success from failure by the body shape.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::models::{AppState, CopyObjectRequest, UriRequest, UriResponse};
use crate::storage::GatewayResult;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/storage/decompose", post(decompose))
        .route("/api/storage/signed-url", post(signed_url))
        .route("/api/storage/containers", post(ensure_container))
        .route("/api/storage/copy", post(copy_object))
        .route("/api/storage/download", post(download))
        .with_state(state)
}

fn gateway_response<T: Serialize>(result: GatewayResult<T>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(descriptor) => (StatusCode::OK, Json(descriptor)).into_response(),
    }
}

async fn decompose(
    State(state): State<AppState>,
    Json(request): Json<UriRequest>,
) -> impl IntoResponse {
    Json(state.gateway.decompose_uri(&request.uri))
}

async fn signed_url(
    State(state): State<AppState>,
    Json(request): Json<UriRequest>,
) -> impl IntoResponse {
    info!("Signed URL requested for {}", request.uri);
    gateway_response(state.gateway.get_signed_url(&request.uri).await)
}

async fn ensure_container(
    State(state): State<AppState>,
    Json(request): Json<UriRequest>,
) -> impl IntoResponse {
    let result = state
        .gateway
        .ensure_container_exists(&request.uri)
        .await
        .map(|uri| UriResponse { uri });
    gateway_response(result)
}

async fn copy_object(
    State(state): State<AppState>,
    Json(request): Json<CopyObjectRequest>,
) -> impl IntoResponse {
    info!(
        "Copy requested: {} -> {}",
        request.source_uri, request.destination_key
    );
    let result = state
        .gateway
        .copy_object(&request.source_uri, &request.destination_key)
        .await
        .map(|uri| UriResponse { uri });
    gateway_response(result)
}

async fn download(
    State(state): State<AppState>,
    Json(request): Json<UriRequest>,
) -> impl IntoResponse {
    info!("Download requested for {}", request.uri);
    gateway_response(state.gateway.download_object(&request.uri).await)
}
