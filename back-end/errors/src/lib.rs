//! Process-level errors shared by the help center binaries.
//!
//! Request-scoped failures live next to the services that raise them; this
//! enum covers startup, migration and serving.

use std::error::Error as StdError;

use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(BoxError),

    #[error("Migration error: {0}")]
    Migration(BoxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
