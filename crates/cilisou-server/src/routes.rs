use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::Serialize;

use cilisou_core::ResolveBackend;

use crate::search;
use crate::state::AppState;

pub fn create_router<B: ResolveBackend + 'static>(state: Arc<AppState<B>>) -> Router {
    Router::new()
        .route("/", get(search::search::<B>))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
