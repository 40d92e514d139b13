use sea_orm::DatabaseConnection;

/// Shared state handed to every REST handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub api_prefix: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, api_prefix: impl Into<String>) -> Self {
        Self {
            db,
            api_prefix: api_prefix.into(),
        }
    }
}
