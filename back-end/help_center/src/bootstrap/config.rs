//! Service configuration loaded from the environment.

use std::time::Duration;

use errors::AppError;

use crate::utils::env::{env_bool, env_duration_secs, env_list, env_string, env_u16, env_u32};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

/// Connection pool settings passed to sea-orm.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub logging_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub rest_port: u16,
    /// Prepended to every route, e.g. `/api`. Empty mounts at the root.
    pub api_prefix: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://help_center.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(8),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
            logging_enabled: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            rest_port: 8080,
            api_prefix: "/api".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: false,
        }
    }
}

impl DbConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_string("DATABASE_URL", &defaults.url),
            max_connections: env_u32("DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: env_u32("DB_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout: env_duration_secs(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            ),
            idle_timeout: env_duration_secs(
                "DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout.as_secs(),
            ),
            max_lifetime: env_duration_secs(
                "DB_MAX_LIFETIME_SECS",
                defaults.max_lifetime.as_secs(),
            ),
            logging_enabled: env_bool("DB_LOGGING", defaults.logging_enabled),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_string("REST_HOST", &defaults.host),
            rest_port: env_u16("REST_PORT", defaults.rest_port),
            api_prefix: env_string("API_PREFIX", &defaults.api_prefix),
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allowed_origins: env_list("CORS_ALLOWED_ORIGINS", &defaults.allowed_origins),
            allow_credentials: env_bool("CORS_ALLOW_CREDENTIALS", defaults.allow_credentials),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let config = Self {
            db: DbConfig::from_env(),
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.db.url.trim().is_empty() {
            return Err(AppError::Config("DATABASE_URL must not be empty".to_string()));
        }
        if self.db.min_connections > self.db.max_connections {
            return Err(AppError::Config(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                self.db.min_connections, self.db.max_connections
            )));
        }
        let prefix = &self.server.api_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(AppError::Config(format!(
                "API_PREFIX must start with '/' and not end with '/', got {:?}",
                prefix
            )));
        }
        Ok(())
    }
}
