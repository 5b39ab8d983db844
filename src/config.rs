use reqwest::Url;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

const BACKEND_URL_VAR: &str = "RETRIEVER_BACKEND_URL";
const REQUEST_TIMEOUT_VAR: &str = "RETRIEVER_REQUEST_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },
    #[error("Invalid request timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Application configuration
/// In debug builds: also loads a .env file before reading the environment
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Root URL serving both the search endpoint and the image files, without trailing slash
    pub backend_url: String,
    /// Per-request timeout; `None` waits for the backend indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                info!("Config: Dev mode activated - loaded .env file");
            } else {
                info!("Config: No .env file found, using process environment");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_url = match lookup(BACKEND_URL_VAR) {
            Some(raw) if !raw.trim().is_empty() => normalize_backend_url(&raw)?,
            _ => DEFAULT_BACKEND_URL.to_string(),
        };

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_timeout(&raw)?),
            _ => None,
        };

        info!("Config: Backend at {}", backend_url);
        if request_timeout.is_none() {
            debug!("Config: No request timeout configured");
        }

        Ok(Self {
            backend_url,
            request_timeout,
        })
    }

    /// Config targeting the given backend, with no timeout
    pub fn with_backend_url(url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: normalize_backend_url(url)?,
            request_timeout: None,
        })
    }
}

fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBackendUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::InvalidBackendUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
