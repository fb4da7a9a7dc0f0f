//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const FALLBACK_STORAGE_DIR: &str = ".authflow";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Backend origin without a trailing slash.
    pub api_url: String,
    /// Directory holding the durable token slot.
    pub storage_dir: PathBuf,
    /// Per-request HTTP timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl AuthConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `AUTH_API_URL`: default `http://localhost:3000`
    /// - `AUTH_STORAGE_DIR`: default platform data dir, else `.authflow`
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `AUTH_REQUEST_TIMEOUT_SECS` is not a whole number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `AUTH_REQUEST_TIMEOUT_SECS` is not a whole number.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = normalize_api_url(lookup("AUTH_API_URL").as_deref());
        let storage_dir = lookup("AUTH_STORAGE_DIR")
            .filter(|raw| !raw.trim().is_empty())
            .map_or_else(default_storage_dir, PathBuf::from);
        let request_timeout = parse_timeout(lookup("AUTH_REQUEST_TIMEOUT_SECS").as_deref())?;

        Ok(Self { api_url, storage_dir, request_timeout })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned(), storage_dir: default_storage_dir(), request_timeout: None }
    }
}

/// Trim whitespace and trailing `/`; blank input falls back to the default origin.
#[must_use]
pub fn normalize_api_url(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_API_URL);
    raw.trim_end_matches('/').to_owned()
}

fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| ConfigError::Invalid { key: "AUTH_REQUEST_TIMEOUT_SECS", value: raw.to_owned() })
}

fn default_storage_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "authflow")
        .map_or_else(|| PathBuf::from(FALLBACK_STORAGE_DIR), |dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
