//! API documentation handler.

use axum::extract::State;
use axum::response::Json;
use serde_json::Value;

use crate::api::openapi;
use crate::api::servers::app_state::AppState;

/// GET /documentation
pub async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(openapi::document(&state.api_prefix))
}
