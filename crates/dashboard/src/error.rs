//! Top-level dashboard error type.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::form::submit::SubmitError;
use crate::prefs::PrefsError;
use crate::storage::StorageError;

/// Errors surfaced at the dashboard application boundary.
///
/// Individual subsystems keep their own error enums; this type exists so
/// embedding code (a UI shell, a test harness) can hold one error type.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Prefs(#[from] PrefsError),
}
