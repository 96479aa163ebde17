//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Status mapping to registry errors (not found, rate limit, other failures)
//!
//! Requests are made exactly once. A failure is reported to the caller as-is.

use crate::error::RegistryError;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("mmgoget/", env!("CARGO_PKG_VERSION"));

/// Media type requested from the GitHub REST API
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Header GitHub uses to report the remaining request quota
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client })
    }

    /// Create a client with the default User-Agent and the given timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, RegistryError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Perform a GET request with error context
    pub async fn get_with_context(
        &self,
        url: &str,
        repository: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RegistryError::timeout(repository, registry)
                } else {
                    RegistryError::network_error(repository, registry, e.to_string())
                }
            })?;

        check_status(response.status(), response.headers(), repository, registry)?;
        Ok(response)
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        repository: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, repository, registry).await?;

        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(
                repository,
                registry,
                format!("failed to parse JSON: {}", e),
            )
        })
    }
}

/// Map a response status onto a registry error
fn check_status(
    status: StatusCode,
    headers: &HeaderMap,
    repository: &str,
    registry: &str,
) -> Result<(), RegistryError> {
    if status.is_success() {
        return Ok(());
    }

    // GitHub answers an exhausted quota with 403 and a zero remaining count
    let quota_exhausted = headers
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);

    if status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && quota_exhausted)
    {
        return Err(RegistryError::rate_limit_exceeded(registry));
    }

    if status == StatusCode::NOT_FOUND {
        return Err(RegistryError::not_found(repository, registry));
    }

    Err(RegistryError::network_error(
        repository,
        registry,
        format!("HTTP {}", status),
    ))
}
