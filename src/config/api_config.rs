//! Price API configuration parsing from environment variables.

use crate::domain::errors::ConfigError;

pub const API_KEY_ENV: &str = "TANKERKOENIG_API_KEY";
pub const BASE_URL_ENV: &str = "TANKERKOENIG_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://creativecommons.tankerkoenig.de";

/// Tankerkönig API configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup so tests don't touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingEnv { name: API_KEY_ENV })?;

        let base_url = lookup(BASE_URL_ENV)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}
