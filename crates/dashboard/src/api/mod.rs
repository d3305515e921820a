//! MySwipe backend REST client.
//!
//! One client instance is shared across the dashboard (cheap to clone, all
//! state behind an `Arc`). Every call attaches the bearer token obtained
//! from the hosted auth session when one is cached; an absent token still
//! attempts the call unauthenticated and lets the server decide
//! authorization.
//!
//! # Error mapping
//!
//! - transport failure -> [`ApiError::Network`] with the target URL
//! - elapsed timeout -> [`ApiError::Timeout`]
//! - non-2xx response -> [`ApiError::Status`] carrying the response body as
//!   the user-facing message (falling back to the status code)

mod analytics;
mod boosts;
mod payouts;
mod products;
mod seller;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use url::Url;

use crate::config::ApiConfig;

use thiserror::Error;

/// Errors that can occur when calling the MySwipe backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure before a response was received.
    #[error("network error calling {url}: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    /// The call exceeded the configured timeout.
    #[error("timeout calling {url}")]
    Timeout { url: String },

    /// The backend answered with a non-2xx status.
    ///
    /// The message is the response body when present, so upstream error
    /// text reaches the notification channel unchanged.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),
}

/// Bearer token obtained from the hosted auth session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// The access token attached to API calls.
    pub access_token: String,
    /// Unix timestamp when the token was obtained.
    pub obtained_at: i64,
}

impl AuthToken {
    /// Create a token record stamped with the current time.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            obtained_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// MySwipe backend API client.
///
/// Provides typed access to the seller-facing backend endpoints for
/// products, boosts, payouts, analytics, and the seller profile.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    /// In-memory session token cache (refreshed by the auth integration)
    token: RwLock<Option<AuthToken>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_base_url(&config.base_url, config.timeout)
    }

    /// Create a client against an explicit base URL (used by tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// fails to build.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        // Validate early so a bad config fails at startup, not first call.
        let parsed = Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: parsed.as_str().trim_end_matches('/').to_string(),
                token: RwLock::new(None),
            }),
        })
    }

    /// Get the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Cache the session token used for bearer authentication.
    pub async fn set_token(&self, token: AuthToken) {
        *self.inner.token.write().await = Some(token);
    }

    /// Check whether a session token is cached.
    pub async fn has_token(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    /// Clear the cached session token (logout).
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Execute a GET request and parse the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self.execute(self.inner.client.get(&url), &url).await?;
        parse_json(response, &url).await
    }

    /// Execute a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self
            .execute(self.inner.client.get(&url).query(query), &url)
            .await?;
        parse_json(response, &url).await
    }

    /// Execute a POST request with a JSON body and parse the response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self
            .execute(self.inner.client.post(&url).json(body), &url)
            .await?;
        parse_json(response, &url).await
    }

    /// Execute a POST request without a body and parse the response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self.execute(self.inner.client.post(&url), &url).await?;
        parse_json(response, &url).await
    }

    /// Execute a PATCH request with a JSON body, discarding the response
    /// body.
    pub(crate) async fn patch<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path);
        self.execute(self.inner.client.patch(&url).json(body), &url)
            .await?;
        Ok(())
    }

    /// Execute a DELETE request, discarding the response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path);
        self.execute(self.inner.client.delete(&url), &url).await?;
        Ok(())
    }

    /// Attach the bearer token (if cached), send, and map the response
    /// status.
    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let token = self.inner.token.read().await.clone();
        let builder = match token {
            Some(token) => builder.bearer_auth(token.access_token),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| classify_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.as_u16().to_string()
            } else {
                body
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

fn classify_send_error(url: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            url: url.to_string(),
        }
    } else {
        ApiError::Network {
            url: url.to_string(),
            source: err,
        }
    }
}

async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<T, ApiError> {
    let body = response
        .text()
        .await
        .map_err(|e| classify_send_error(url, e))?;
    Ok(serde_json::from_str(&body)?)
}
