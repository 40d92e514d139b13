//! Request extractors whose rejections use the API error envelope.
//!
//! axum's own `Path` and `Json` rejections are plain text; these wrappers
//! turn them into [`ApiError`] so every failure is JSON.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::dto::ApiError;

/// Integer id taken from the single path parameter of a route.
///
/// Ids that do not parse as an `i32` (non-numeric or out of range) cannot
/// name a stored row, so they are answered with 404.
#[derive(Debug, Clone, Copy)]
pub struct Id(pub i32);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection.body_text(), "Path rejected");
                ApiError::not_found("Resource")
            })?;

        raw.parse::<i32>()
            .map(Id)
            .map_err(|_| ApiError::not_found(&format!("Resource {}", raw)))
    }
}

/// JSON request body. Syntax, type and content-type failures keep axum's
/// status code but are reported in the `{message, errors}` envelope.
#[derive(Debug, Clone)]
pub struct Body<T>(pub T);

impl<S, T> FromRequest<S> for Body<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Body(value)),
            Err(rejection) => Err(ApiError::invalid_body(
                rejection.status(),
                rejection.body_text(),
            )),
        }
    }
}
