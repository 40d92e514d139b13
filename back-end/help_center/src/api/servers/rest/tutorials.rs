//! Tutorial handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::dto::{ApiError, NamePayload, TutorialResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::extract::{Body, Id};
use crate::modules::knowledge_base::TutorialService;

/// GET /projects/{project_id}/tutorials
pub async fn list(
    State(state): State<AppState>,
    Id(project_id): Id,
) -> Result<Json<Vec<TutorialResponse>>, ApiError> {
    let tutorials = TutorialService::new(&state.db)
        .list_for_project(project_id)
        .await?;

    Ok(Json(tutorials.into_iter().map(Into::into).collect()))
}

/// POST /projects/{project_id}/tutorials
pub async fn create(
    State(state): State<AppState>,
    Id(project_id): Id,
    Body(payload): Body<NamePayload>,
) -> Result<Json<TutorialResponse>, ApiError> {
    let name = payload.name.unwrap_or_default();
    let tutorial = TutorialService::new(&state.db)
        .create(project_id, &name)
        .await?;

    Ok(Json(tutorial.into()))
}

/// GET /tutorials/{id}
pub async fn get(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<Json<TutorialResponse>, ApiError> {
    let tutorial = TutorialService::new(&state.db).get(id).await?;

    Ok(Json(tutorial.into()))
}

/// PUT|PATCH /tutorials/{id}
pub async fn update(
    State(state): State<AppState>,
    Id(id): Id,
    Body(payload): Body<NamePayload>,
) -> Result<Json<TutorialResponse>, ApiError> {
    let tutorial = TutorialService::new(&state.db)
        .update(id, payload.name)
        .await?;

    Ok(Json(tutorial.into()))
}

/// DELETE /tutorials/{id}
pub async fn delete(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<StatusCode, ApiError> {
    TutorialService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
