//! Configuration loading
//!
//! The API key is read once at startup and handed to [`crate::serper::SerperClient`]
//! explicitly. A missing key is reported here, before any query is made.

use crate::error::{SearchError, SearchResult as Result, DEFAULT_TIMEOUT_MS};
use std::env;
use std::fmt;
use std::path::Path;

/// Environment variable holding the Serper API key
pub const API_KEY_VAR: &str = "SERPER_API_KEY";
/// Optional endpoint override
pub const ENDPOINT_VAR: &str = "SERPER_ENDPOINT";
/// Optional request timeout in milliseconds
pub const TIMEOUT_VAR: &str = "SERPER_TIMEOUT_MS";

/// Serper search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://google.serper.dev/search";

/// Static API key. Never printed: `Debug` and `Display` show `***`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(SearchError::ConfigError(format!(
                "{API_KEY_VAR} is required"
            )));
        }
        Ok(Self(key.to_string()))
    }

    /// Raw key, for the request header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Process-wide, read-only settings
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: ApiCredential,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Config {
    pub fn new(credential: ApiCredential) -> Self {
        Self {
            credential,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Load a `.env` file (the given one, or the nearest one found), then read the environment
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenv::from_path(path).map_err(|e| {
                    SearchError::ConfigError(format!(
                        "Failed to load env file {}: {e}",
                        path.display()
                    ))
                })?;
            }
            None => {
                dotenv::dotenv().ok();
            }
        }
        Self::from_env()
    }

    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(API_KEY_VAR).ok_or_else(|| {
            SearchError::ConfigError(format!(
                "{API_KEY_VAR} is not set. Export it or add it to a .env file"
            ))
        })?;
        let mut config = Self::new(ApiCredential::new(&key)?);

        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            url::Url::parse(endpoint.trim()).map_err(|e| {
                SearchError::ConfigError(format!("{ENDPOINT_VAR} is not a valid URL: {e}"))
            })?;
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(timeout) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            config.timeout_ms = parse_timeout(&timeout)?;
        }

        Ok(config)
    }
}

fn parse_timeout(value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(SearchError::ConfigError(format!(
            "{TIMEOUT_VAR} must be a positive number of milliseconds, got '{value}'"
        ))),
    }
}
