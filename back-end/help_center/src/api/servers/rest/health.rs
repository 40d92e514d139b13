//! Health check handler.

use axum::extract::State;
use axum::response::Json;
use serde_json::{Value, json};
use tracing::warn;

use crate::api::servers::app_state::AppState;

/// Health check endpoint. Reports degraded when the database does not answer.
pub async fn check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.db.ping().await {
        Ok(()) => "up",
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            "down"
        }
    };
    let status = if database == "up" { "healthy" } else { "degraded" };

    Json(json!({
        "status": status,
        "database": database,
        "timestamp": chrono::Utc::now()
    }))
}
