//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MYSWIPE_API_BASE_URL` - Base URL of the MySwipe backend (e.g.,
//!   `https://api.myswipe.app`)
//! - `MYSWIPE_STORAGE_URL` - Base URL of the hosted object storage
//!
//! ## Optional
//! - `MYSWIPE_STORAGE_ANON_KEY` - Publishable storage key sent with SDK-style
//!   uploads
//! - `MYSWIPE_API_TIMEOUT_SECS` - Timeout for API calls (default: 60)
//! - `MYSWIPE_UPLOAD_TIMEOUT_SECS` - Comma-separated per-attempt timeouts for
//!   binary uploads (default: 60,120,240)
//! - `MYSWIPE_PREFS_PATH` - Path of the persisted preference file (default:
//!   `myswipe-prefs.json` in the current directory)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_API_TIMEOUT_SECS: u64 = 60;
const DEFAULT_UPLOAD_TIMEOUT_SECS: [u64; 3] = [60, 120, 240];
const DEFAULT_PREFS_FILE: &str = "myswipe-prefs.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// MySwipe backend API configuration
    pub api: ApiConfig,
    /// Object storage configuration
    pub storage: StorageConfig,
    /// Path of the persisted preference file
    pub prefs_path: PathBuf,
}

/// MySwipe backend API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (no trailing slash required)
    pub base_url: String,
    /// Timeout applied to every API call
    pub timeout: Duration,
}

/// Object storage configuration.
///
/// Implements `Debug` manually to redact the storage key.
#[derive(Clone)]
pub struct StorageConfig {
    /// Base URL of the hosted storage (e.g., `https://xyz.supabase.co`)
    pub base_url: String,
    /// Publishable key attached to SDK-style signed uploads (optional)
    pub anon_key: Option<SecretString>,
    /// Per-attempt timeouts for binary uploads, in order
    pub attempt_timeouts: [Duration; 3],
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("base_url", &self.base_url)
            .field(
                "anon_key",
                &self.anon_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("attempt_timeouts", &self.attempt_timeouts)
            .finish()
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            api: ApiConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            prefs_path: get_env_or_default("MYSWIPE_PREFS_PATH", DEFAULT_PREFS_FILE).into(),
        })
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = get_env_or_default(
            "MYSWIPE_API_TIMEOUT_SECS",
            &DEFAULT_API_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("MYSWIPE_API_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url: get_required_env("MYSWIPE_API_BASE_URL")?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let attempt_timeouts = match get_optional_env("MYSWIPE_UPLOAD_TIMEOUT_SECS") {
            Some(raw) => parse_attempt_timeouts(&raw)?,
            None => DEFAULT_UPLOAD_TIMEOUT_SECS.map(Duration::from_secs),
        };

        Ok(Self {
            base_url: get_required_env("MYSWIPE_STORAGE_URL")?,
            anon_key: get_optional_env("MYSWIPE_STORAGE_ANON_KEY").map(SecretString::from),
            attempt_timeouts,
        })
    }
}

fn parse_attempt_timeouts(raw: &str) -> Result<[Duration; 3], ConfigError> {
    let parts: Vec<u64> = raw
        .split(',')
        .map(|p| {
            p.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "MYSWIPE_UPLOAD_TIMEOUT_SECS".to_string(),
                    e.to_string(),
                )
            })
        })
        .collect::<Result<_, _>>()?;

    match <[u64; 3]>::try_from(parts) {
        Ok(secs) => Ok(secs.map(Duration::from_secs)),
        Err(_) => Err(ConfigError::InvalidEnvVar(
            "MYSWIPE_UPLOAD_TIMEOUT_SECS".to_string(),
            "expected exactly three comma-separated values".to_string(),
        )),
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_attempt_timeouts_valid() {
        let timeouts = parse_attempt_timeouts("30, 60,90").unwrap();
        assert_eq!(
            timeouts,
            [
                Duration::from_secs(30),
                Duration::from_secs(60),
                Duration::from_secs(90)
            ]
        );
    }

    #[test]
    fn parse_attempt_timeouts_wrong_arity() {
        assert!(parse_attempt_timeouts("30,60").is_err());
        assert!(parse_attempt_timeouts("30,60,90,120").is_err());
    }

    #[test]
    fn parse_attempt_timeouts_non_numeric() {
        assert!(parse_attempt_timeouts("30,sixty,90").is_err());
    }

    #[test]
    fn storage_config_debug_redacts_key() {
        let config = StorageConfig {
            base_url: "https://storage.example.com".to_string(),
            anon_key: Some(SecretString::from("sb_publishable_abc123")),
            attempt_timeouts: DEFAULT_UPLOAD_TIMEOUT_SECS.map(Duration::from_secs),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://storage.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sb_publishable_abc123"));
    }
}
