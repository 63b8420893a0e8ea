//! wcb-core - Core library for wcb-privacy
//!
//! This crate provides personal data export for WordCamp budget records
//! (reimbursement requests and vendor payment requests), including the
//! field mapping table, metadata extraction, paginated record queries and
//! the exporter/eraser registries consumed by a privacy request orchestrator.

pub mod error;
pub mod types;
pub mod config;
pub mod host;
pub mod privacy;

pub use error::{PrivacyError, Result};
pub use types::*;
