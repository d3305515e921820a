//! Product listing editor.
//!
//! The editor is modeled as explicit state plus pure derivation functions
//! rather than a reactive graph: mutations update [`draft::ProductDraft`],
//! and recomputation rules (variant matrix reconciliation, deal pricing)
//! are ordinary functions invoked after each relevant mutation, which
//! keeps them independently testable.
//!
//! - [`options`] - option axes and the cartesian variant matrix
//! - [`pricing`] - profit/margin and deal-price derivation
//! - [`media`] - staged images/videos with preview-handle lifecycle
//! - [`draft`] - the aggregate draft being created or edited
//! - [`validate`] - field-level validation ahead of submission
//! - [`submit`] - the multi-step remote submission orchestrator

pub mod draft;
pub mod media;
pub mod options;
pub mod pricing;
pub mod submit;
pub mod validate;
