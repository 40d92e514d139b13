//! Environment variable parsing utilities.
//!
//! Provides consistent, ergonomic helpers for loading configuration from environment variables.
//! Each helper follows the pattern: try env var → parse → fallback to default.
//!
//! # Example
//!
//! ```rust
//! use help_center::utils::env::{env_bool, env_list, env_string, env_u16};
//!
//! let port = env_u16("REST_PORT", 8080);
//! let logging = env_bool("DB_LOGGING", false);
//! let url = env_string("DATABASE_URL", "sqlite://help_center.db?mode=rwc");
//! let origins = env_list("CORS_ALLOWED_ORIGINS", &["http://localhost:3000"]);
//! ```

/// Get a u64 from environment, with default fallback.
///
/// Returns `default` if:
/// - Environment variable is not set
/// - Value cannot be parsed as u64
#[inline]
pub fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a u32 from environment, with default fallback.
#[inline]
pub fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a u16 from environment, with default fallback.
#[inline]
pub fn env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a bool from environment, with default fallback.
///
/// Recognizes: "true", "1", "yes", "on" (case-insensitive) as true.
/// Any other value is false; unset returns the default.
#[inline]
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(default)
}

/// Get a String from environment, with default fallback.
#[inline]
pub fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a comma separated list from environment, with default fallback.
///
/// Entries are trimmed and empty entries dropped.
pub fn env_list<S: AsRef<str>>(key: &str, default: &[S]) -> Vec<String> {
    match std::env::var(key) {
        Ok(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Err(_) => default.iter().map(|s| s.as_ref().to_string()).collect(),
    }
}

/// Get a Duration (in seconds) from environment, with default fallback.
#[inline]
pub fn env_duration_secs(key: &str, default_secs: u64) -> std::time::Duration {
    std::time::Duration::from_secs(env_u64(key, default_secs))
}
