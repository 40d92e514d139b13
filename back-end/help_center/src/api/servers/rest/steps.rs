//! Step handlers, including the steps-many bulk replacement.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::dto::{ApiError, StepPayload, StepResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::extract::{Body, Id};
use crate::modules::knowledge_base::{NewStep, StepService};

/// GET /tutorials/{tutorial_id}/steps
pub async fn list(
    State(state): State<AppState>,
    Id(tutorial_id): Id,
) -> Result<Json<Vec<StepResponse>>, ApiError> {
    let steps = StepService::new(&state.db)
        .list_for_tutorial(tutorial_id)
        .await?;

    Ok(Json(steps.into_iter().map(Into::into).collect()))
}

/// POST /tutorials/{tutorial_id}/steps
pub async fn create(
    State(state): State<AppState>,
    Id(tutorial_id): Id,
    Body(payload): Body<StepPayload>,
) -> Result<Json<StepResponse>, ApiError> {
    let step = StepService::new(&state.db)
        .create(tutorial_id, payload.into())
        .await?;

    Ok(Json(step.into()))
}

/// POST /tutorials/{tutorial_id}/steps-many
pub async fn replace_all(
    State(state): State<AppState>,
    Id(tutorial_id): Id,
    Body(payload): Body<Vec<StepPayload>>,
) -> Result<Json<Vec<StepResponse>>, ApiError> {
    let steps: Vec<NewStep> = payload.into_iter().map(Into::into).collect();
    let inserted = StepService::new(&state.db)
        .replace_all(tutorial_id, steps)
        .await?;

    Ok(Json(inserted.into_iter().map(Into::into).collect()))
}

/// GET /steps/{id}
pub async fn get(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<Json<StepResponse>, ApiError> {
    let step = StepService::new(&state.db).get(id).await?;

    Ok(Json(step.into()))
}

/// PUT|PATCH /steps/{id}
pub async fn update(
    State(state): State<AppState>,
    Id(id): Id,
    Body(payload): Body<StepPayload>,
) -> Result<Json<StepResponse>, ApiError> {
    let step = StepService::new(&state.db)
        .update(id, payload.into())
        .await?;

    Ok(Json(step.into()))
}

/// DELETE /steps/{id}
pub async fn delete(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<StatusCode, ApiError> {
    StepService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
