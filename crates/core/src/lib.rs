//! MySwipe Core - Shared types library.
//!
//! This crate provides common types used across the MySwipe seller
//! dashboard components:
//! - `dashboard` - Application core (API clients, product form engine)
//! - `integration-tests` - Cross-crate flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, minor-unit money,
//!   media kinds, and entity statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
