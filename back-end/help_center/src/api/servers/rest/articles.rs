//! Article handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::api::dto::{ApiError, ArticlePayload, ArticleResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::extract::{Body, Id};
use crate::modules::knowledge_base::ArticleService;

/// GET /projects/{project_id}/articles
pub async fn list(
    State(state): State<AppState>,
    Id(project_id): Id,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let articles = ArticleService::new(&state.db)
        .list_for_project(project_id)
        .await?;

    Ok(Json(articles.into_iter().map(Into::into).collect()))
}

/// POST /projects/{project_id}/articles
pub async fn create(
    State(state): State<AppState>,
    Id(project_id): Id,
    Body(payload): Body<ArticlePayload>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = ArticleService::new(&state.db)
        .create(project_id, payload.into())
        .await?;

    Ok(Json(article.into()))
}

/// GET /articles/{id}
pub async fn get(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = ArticleService::new(&state.db).get(id).await?;

    Ok(Json(article.into()))
}

/// PUT|PATCH /articles/{id}
pub async fn update(
    State(state): State<AppState>,
    Id(id): Id,
    Body(payload): Body<ArticlePayload>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = ArticleService::new(&state.db)
        .update(id, payload.into())
        .await?;

    Ok(Json(article.into()))
}

/// DELETE /articles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Id(id): Id,
) -> Result<StatusCode, ApiError> {
    ArticleService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
