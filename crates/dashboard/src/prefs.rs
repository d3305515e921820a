//! Persisted seller preferences.
//!
//! The browser build kept these in a module-level persisted store; here
//! they are an explicit, typed object with a load-at-startup /
//! save-on-change lifecycle, passed by reference through the view
//! hierarchy. Exactly one logical flow writes at a time, so there is no
//! locking.
//!
//! Only durable preferences persist. List filter state
//! ([`ProductFilters`], [`OrderFilters`]) is ephemeral by design and
//! lives in plain structs with reset helpers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use myswipe_core::{ListingMode, OrderStatus};

use crate::api::types::StatusFilter;

/// Errors from the preference store.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference file I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Th,
}

/// Payout onboarding checklist state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OnboardingFlags {
    pub identity_verified: bool,
    pub bank_linked: bool,
    pub tax_provided: bool,
}

/// Thai-format store address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAddress {
    pub country: String,
    pub full_name: String,
    pub phone: String,
    pub province: String,
    pub district: String,
    pub subdistrict: String,
    pub postal_code: String,
    pub address_line1: String,
}

/// Store profile and notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub store_name: String,
    pub store_slug: String,
    pub contact_email: String,
    pub return_policy: String,
    pub tax_id_masked: String,
    pub notify_order: bool,
    pub notify_payout: bool,
    pub address: Option<StoreAddress>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "Myshop".to_string(),
            store_slug: "myshop".to_string(),
            contact_email: "owner@example.com".to_string(),
            return_policy: "Items can be returned within 30 days in original condition."
                .to_string(),
            tax_id_masked: "\u{2022}\u{2022}\u{2022}-\u{2022}\u{2022}-1234".to_string(),
            notify_order: true,
            notify_payout: true,
            address: None,
        }
    }
}

/// The durable preference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Preferences {
    /// Whether a session was established (drives the auth gate).
    pub authenticated: bool,
    pub locale: Locale,
    pub onboarding: OnboardingFlags,
    pub settings: StoreSettings,
}

/// File-backed preference store.
///
/// Loads once at startup; every mutation through [`Self::update`] writes
/// the file back immediately.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl PreferenceStore {
    /// Load preferences, falling back to defaults when the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let prefs = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, prefs })
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current preferences.
    #[must_use]
    pub const fn get(&self) -> &Preferences {
        &self.prefs
    }

    /// Mutate the preferences and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn update(&mut self, mutate: impl FnOnce(&mut Preferences)) -> Result<(), PrefsError> {
        mutate(&mut self.prefs);
        self.save()
    }

    fn save(&self) -> Result<(), PrefsError> {
        let raw = serde_json::to_string_pretty(&self.prefs)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Ephemeral filter state of the products screen. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilters {
    pub search: String,
    pub status: Option<StatusFilter>,
    pub category: Option<String>,
    pub mode: Option<ListingMode>,
    pub min_discount: Option<u8>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            category: None,
            mode: None,
            min_discount: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl ProductFilters {
    /// Back to defaults (the page size survives a reset).
    pub fn reset(&mut self) {
        let page_size = self.page_size;
        *self = Self {
            page_size,
            ..Self::default()
        };
    }
}

/// Ephemeral filter state of the orders screen. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderFilters {
    pub search: String,
    pub status: Option<OrderStatus>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
}

impl OrderFilters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
