//! Direct-to-object-storage uploads.
//!
//! Binary payloads never pass through the MySwipe backend: the backend
//! issues a signed destination ([`crate::api::types::SignedUpload`]) and
//! the dashboard uploads straight to hosted storage.
//!
//! # Transports
//!
//! Attempt 1 uses the storage service's signed-upload endpoint (token in
//! the query string). If that fails, the remaining attempts fall back to a
//! raw `PUT` against the pre-authorized `uploadUrl`. Every attempt sends
//! `x-upsert: true`, so a retry that lands after a half-completed write
//! simply overwrites the object - that upsert semantic is what makes the
//! retries safe without an idempotency key.
//!
//! Attempt timeouts are staged (60 s, 120 s, 240 s by default): large
//! payloads on slow links get progressively more room instead of failing
//! the whole submission on the first slow attempt.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::api::types::SignedUpload;
use crate::config::StorageConfig;

/// Header requesting overwrite semantics from the storage service.
const UPSERT_HEADER: &str = "x-upsert";

/// Storage buckets owned by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    ProductImages,
    ProductVideos,
}

impl Bucket {
    /// Bucket name on the storage service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProductImages => "product-images",
            Self::ProductVideos => "product-videos",
        }
    }
}

/// Errors that can occur when talking to object storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The configured base URL is not a valid URL.
    #[error("invalid storage URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),

    /// Every upload attempt failed; carries the last failure.
    #[error("upload failed after {attempts} attempts: {message}")]
    Upload { attempts: u32, message: String },
}

/// Object storage upload client.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    client: reqwest::Client,
    base_url: String,
    anon_key: Option<SecretString>,
    attempt_timeouts: [Duration; 3],
}

impl StorageClient {
    /// Create a new storage client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// fails to build.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let parsed = Url::parse(&config.base_url)?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(StorageError::Client)?;

        Ok(Self {
            inner: Arc::new(StorageClientInner {
                client,
                base_url: parsed.as_str().trim_end_matches('/').to_string(),
                anon_key: config.anon_key.clone(),
                attempt_timeouts: config.attempt_timeouts,
            }),
        })
    }

    /// Upload a payload to a signed destination, retrying with the
    /// fallback transport on failure.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Upload`] once every attempt has failed.
    #[instrument(skip(self, signed, bytes), fields(bucket = bucket.as_str(), size = bytes.len()))]
    pub async fn upload(
        &self,
        bucket: Bucket,
        signed: &SignedUpload,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let attempts = self.inner.attempt_timeouts.len() as u32;
        let mut last_error = String::new();

        for (attempt, timeout) in self.inner.attempt_timeouts.iter().enumerate() {
            let result = if attempt == 0 {
                self.signed_upload(bucket, signed, bytes.clone(), content_type, *timeout)
                    .await
            } else {
                self.raw_put(signed, bytes.clone(), content_type, *timeout)
                    .await
            };

            match result {
                Ok(()) => return Ok(()),
                Err(message) => {
                    tracing::warn!(attempt = attempt + 1, "upload attempt failed: {message}");
                    last_error = message;
                }
            }
        }

        Err(StorageError::Upload {
            attempts,
            message: last_error,
        })
    }

    /// SDK-style upload against the signed-upload endpoint.
    async fn signed_upload(
        &self,
        bucket: Bucket,
        signed: &SignedUpload,
        bytes: Vec<u8>,
        content_type: &str,
        timeout: Duration,
    ) -> Result<(), String> {
        let url = format!(
            "{}/storage/v1/object/upload/sign/{}/{}",
            self.inner.base_url,
            bucket.as_str(),
            signed.path
        );

        let mut builder = self
            .inner
            .client
            .put(&url)
            .query(&[("token", signed.token.as_str())])
            .header(CONTENT_TYPE, content_type)
            .header(UPSERT_HEADER, "true")
            .timeout(timeout)
            .body(bytes);
        if let Some(key) = self.inner.anon_key.as_ref() {
            builder = builder.header("apikey", key.expose_secret());
        }

        check_upload_response(builder.send().await).await
    }

    /// Raw `PUT` against the pre-authorized upload URL.
    async fn raw_put(
        &self,
        signed: &SignedUpload,
        bytes: Vec<u8>,
        content_type: &str,
        timeout: Duration,
    ) -> Result<(), String> {
        let builder = self
            .inner
            .client
            .put(&signed.upload_url)
            .header(CONTENT_TYPE, content_type)
            .header(UPSERT_HEADER, "true")
            .timeout(timeout)
            .body(bytes);

        check_upload_response(builder.send().await).await
    }
}

async fn check_upload_response(
    result: Result<reqwest::Response, reqwest::Error>,
) -> Result<(), String> {
    match result {
        Ok(response) if response.status().is_success() => Ok(()),
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            if body.trim().is_empty() {
                Err(format!("upload failed ({status})"))
            } else {
                Err(body)
            }
        }
        Err(err) if err.is_timeout() => Err("upload timed out".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

/// Resolver for public media URLs on the storage service.
#[derive(Debug, Clone)]
pub struct PublicUrls {
    base_url: String,
}

impl PublicUrls {
    /// Create a resolver from the storage configuration.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_base_url(&config.base_url)
    }

    /// Create a resolver against an explicit base URL (used by tests).
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Public URL of an image object.
    #[must_use]
    pub fn image(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url,
            Bucket::ProductImages.as_str()
        )
    }

    /// Public URL of a video object.
    #[must_use]
    pub fn video(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url,
            Bucket::ProductVideos.as_str()
        )
    }
}

/// File extension for a MIME content type, used to name uploaded objects.
#[must_use]
pub fn ext_from_content_type(content_type: &str) -> String {
    let t = content_type.to_lowercase();
    if t.contains("png") {
        return "png".to_string();
    }
    if t.contains("jpeg") || t.contains("jpg") {
        return "jpg".to_string();
    }
    if t.contains("gif") {
        return "gif".to_string();
    }
    if t.contains("webp") {
        return "webp".to_string();
    }
    if t.contains("webm") {
        return "webm".to_string();
    }
    if t.contains("mp4") {
        return "mp4".to_string();
    }
    if t.contains("quicktime") {
        return "mov".to_string();
    }
    if let Some(subtype) = t.strip_prefix("video/") {
        let cleaned: String = subtype
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if cleaned.is_empty() {
            return "mp4".to_string();
        }
        return cleaned;
    }
    "bin".to_string()
}
