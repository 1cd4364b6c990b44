//! Store connection configuration.
//!
//! # Responsibility
//! - Resolve endpoint, credentials, and paging defaults from the process
//!   environment for shell/FFI callers.
//! - Validate configuration before any client is constructed.
//!
//! # Invariants
//! - The endpoint must be an absolute http(s) URL.
//! - Page size is normalized into `1..=MAX_PAGE_SIZE` with a default of 10.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable naming the GraphQL endpoint URL.
pub const ENDPOINT_ENV: &str = "TINYTHOUGHTS_ENDPOINT";
/// Environment variable holding an optional bearer token.
pub const AUTH_TOKEN_ENV: &str = "TINYTHOUGHTS_AUTH_TOKEN";
/// Environment variable overriding the feed page size.
pub const PAGE_SIZE_ENV: &str = "TINYTHOUGHTS_PAGE_SIZE";

/// Notes requested per feed fetch when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound accepted for a configured page size.
pub const MAX_PAGE_SIZE: u32 = 50;

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration failure surfaced before any network activity.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No endpoint present in the environment.
    MissingEndpoint,
    /// Endpoint present but not an absolute http(s) URL.
    InvalidEndpoint(String),
    /// Page size present but not a positive integer.
    InvalidPageSize(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEndpoint => {
                write!(f, "store endpoint is not configured; set {ENDPOINT_ENV}")
            }
            Self::InvalidEndpoint(value) => {
                write!(f, "store endpoint must be an http(s) URL, got `{value}`")
            }
            Self::InvalidPageSize(value) => {
                write!(f, "page size must be a positive integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Connection settings for the hosted content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub page_size: u32,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Creates a config for the given endpoint with defaults elsewhere.
    ///
    /// # Errors
    /// - Rejects empty endpoints and non-http(s) URLs.
    pub fn new(endpoint: impl Into<String>) -> ConfigResult<Self> {
        let endpoint = endpoint.into().trim().to_string();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }
        Ok(Self {
            endpoint,
            auth_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        })
    }

    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    /// - `MissingEndpoint` when the endpoint variable is absent or blank.
    /// - `InvalidEndpoint` / `InvalidPageSize` for malformed values.
    pub fn from_env() -> ConfigResult<Self> {
        let endpoint = std::env::var(ENDPOINT_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        let mut config = Self::new(endpoint)?;

        if let Ok(raw) = std::env::var(AUTH_TOKEN_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                config.auth_token = Some(trimmed.to_string());
            }
        }

        if let Ok(raw) = std::env::var(PAGE_SIZE_ENV) {
            let parsed: u32 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPageSize(raw.clone()))?;
            if parsed == 0 {
                return Err(ConfigError::InvalidPageSize(raw));
            }
            config.page_size = normalize_page_size(Some(parsed));
        }

        Ok(config)
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = normalize_page_size(Some(page_size));
        self
    }
}

/// Normalizes a requested page size into the accepted range.
///
/// `None` and `Some(0)` fall back to the default; oversized values clamp to
/// [`MAX_PAGE_SIZE`].
pub fn normalize_page_size(page_size: Option<u32>) -> u32 {
    match page_size {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(value) if value > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
        Some(value) => value,
    }
}
