//! Personal data export for budget records
//!
//! This module turns reimbursement requests and vendor payment requests
//! authored by a user into the paginated `{data, done}` pages expected by a
//! personal data export orchestrator.
//!
//! # Overview
//!
//! - [`mapping`]: metadata key to label table, shared by both record types
//! - [`meta`]: extraction of present, non-empty mapped fields
//! - [`query`]: one page of records by type and author
//! - [`exporter`]: the reimbursement and vendor payment exporters
//! - [`registry`]: exporter/eraser registration at startup
//!
//! Erasure is deliberately not offered: these records are kept for
//! accounting and audit.
//!
//! # Example
//!
//! ```ignore
//! use wcb_core::privacy::PrivacyRegistry;
//!
//! let registry = PrivacyRegistry::bootstrap(store, accounts);
//! let exporter = registry.exporters().get("wcb-reimbursements").unwrap();
//! let page = exporter.exporter.export("pat@example.com", 1)?;
//! ```

pub mod exporter;
pub mod mapping;
pub mod meta;
pub mod query;
pub mod registry;

pub use exporter::{PersonalDataExporter, RecordExporter};
pub use mapping::{meta_mapping, FIELD_MAPPING};
pub use meta::extract_meta_details;
pub use query::{paginate, query_page, QueryPage, RecordQuery, RECORDS_PER_PAGE};
pub use registry::{
    register_personal_data_erasers, register_personal_data_exporters, EraserEntry,
    EraserRegistry, ExporterEntry, ExporterRegistry, PersonalDataEraser, PrivacyRegistry, Registry,
    REIMBURSEMENTS_EXPORTER, VENDOR_PAYMENTS_EXPORTER,
};
