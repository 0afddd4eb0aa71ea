use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "item-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 200 once the store is connected and answers a ping, 503 otherwise.
///
/// Never starts a connection itself.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(collection) = state.store.initialized_handle() else {
        tracing::warn!("Store not connected yet");
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match collection.ping().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
