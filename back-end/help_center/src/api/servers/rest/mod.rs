//! REST API router configuration.
//!
//! This module contains route definitions and server startup logic.
//! All handler implementations are in their respective submodules.

mod articles;
mod docs;
mod health;
mod projects;
mod steps;
mod tutorials;

use crate::api::dto::ApiError;
use crate::api::servers::app_state::AppState;
use crate::bootstrap::config::Config;
use crate::modules::knowledge_base::ServiceError;
use axum::Router;
use axum::routing::{get, post};
use errors::AppError;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

// ============================================================================
// Error Conversion
// ============================================================================

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => {
                error!(error = %e, "Database error");
                ApiError::internal(e.to_string())
            }
            ServiceError::NotFound(what) => {
                warn!(resource = %what, "Resource not found");
                ApiError::not_found(&what)
            }
            ServiceError::Validation { field, message } => {
                warn!(field = %field, message = %message, "Validation failed");
                ApiError::validation(field, message)
            }
        }
    }
}

async fn fallback() -> ApiError {
    ApiError::not_found("Route")
}

// ============================================================================
// Router
// ============================================================================

/// Build the REST API router with all routes.
pub fn build_router(app_state: AppState, config: &Config) -> Router {
    let cors = build_cors_layer(config);
    let api = config.server.api_prefix.as_str();

    Router::new()
        // Service
        .route(&format!("{api}/health"), get(health::check))
        .route(&format!("{api}/documentation"), get(docs::openapi))
        // Projects
        .route(
            &format!("{api}/projects"),
            get(projects::list).post(projects::create),
        )
        .route(
            &format!("{api}/projects/{{id}}"),
            get(projects::get)
                .put(projects::update)
                .patch(projects::update)
                .delete(projects::delete),
        )
        // Tutorials
        .route(
            &format!("{api}/projects/{{project_id}}/tutorials"),
            get(tutorials::list).post(tutorials::create),
        )
        .route(
            &format!("{api}/tutorials/{{id}}"),
            get(tutorials::get)
                .put(tutorials::update)
                .patch(tutorials::update)
                .delete(tutorials::delete),
        )
        // Steps
        .route(
            &format!("{api}/tutorials/{{tutorial_id}}/steps"),
            get(steps::list).post(steps::create),
        )
        .route(
            &format!("{api}/tutorials/{{tutorial_id}}/steps-many"),
            post(steps::replace_all),
        )
        .route(
            &format!("{api}/steps/{{id}}"),
            get(steps::get)
                .put(steps::update)
                .patch(steps::update)
                .delete(steps::delete),
        )
        // Articles
        .route(
            &format!("{api}/projects/{{project_id}}/articles"),
            get(articles::list).post(articles::create),
        )
        .route(
            &format!("{api}/articles/{{id}}"),
            get(articles::get)
                .put(articles::update)
                .patch(articles::update)
                .delete(articles::delete),
        )
        .fallback(fallback)
        .with_state(app_state)
        .layer(cors)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, ACCEPT, CONTENT_TYPE, AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600));

    if config.cors.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    cors
}

/// Start the REST server.
pub async fn start(app_state: &AppState, config: &Config) -> Result<(), AppError> {
    let app = build_router(app_state.clone(), config);
    let bind_addr = format!("{}:{}", config.server.host, config.server.rest_port);

    info!("Starting REST server on {}", &bind_addr);
    info!("API prefix: {:?}", config.server.api_prefix);
    info!("CORS allowed origins: {:?}", config.cors.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
