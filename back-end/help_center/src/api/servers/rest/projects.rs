//! Project handlers.
//!
//! These handlers follow the thin controller pattern:
//! - Extract path and body
//! - Delegate to ProjectService
//! - Convert to HTTP response

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::dto::{ApiError, NamePayload, ProjectResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::extract::{Body, Id};
use crate::modules::knowledge_base::ProjectService;

/// GET /projects
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = ProjectService::new(&state.db).list().await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    Body(payload): Body<NamePayload>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let name = payload.name.unwrap_or_default();
    let project = ProjectService::new(&state.db).create(&name).await?;

    Ok(Json(project.into()))
}

/// GET /projects/{id}
pub async fn get(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = ProjectService::new(&state.db).get(id).await?;

    Ok(Json(project.into()))
}

/// PUT|PATCH /projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Id(id): Id,
    Body(payload): Body<NamePayload>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = ProjectService::new(&state.db)
        .update(id, payload.name)
        .await?;

    Ok(Json(project.into()))
}

/// DELETE /projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<StatusCode, ApiError> {
    ProjectService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
