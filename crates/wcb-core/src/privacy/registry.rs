//! Exporter and eraser registration
//!
//! Registries are built once at startup by [`PrivacyRegistry::bootstrap`]
//! and handed to the orchestrator; nothing is registered globally.

use super::exporter::{PersonalDataExporter, RecordExporter};
use crate::error::Result;
use crate::host::{AccountDirectory, DocumentStore};
use crate::types::ErasePage;
use std::sync::Arc;
use tracing::debug;

/// Registry key of the reimbursement request exporter
pub const REIMBURSEMENTS_EXPORTER: &str = "wcb-reimbursements";

/// Registry key of the vendor payment request exporter
pub const VENDOR_PAYMENTS_EXPORTER: &str = "wcb-vendor-payments";

/// Callback contract of a personal data eraser
pub trait PersonalDataEraser: Send + Sync {
    /// Erase one page of personal data for an email address
    fn erase(&self, email: &str, page: u32) -> Result<ErasePage>;
}

/// A registered exporter
#[derive(Clone)]
pub struct ExporterEntry {
    /// Display name shown to administrators
    pub friendly_name: String,
    /// Callback
    pub exporter: Arc<dyn PersonalDataExporter>,
}

/// A registered eraser
#[derive(Clone)]
pub struct EraserEntry {
    /// Display name shown to administrators
    pub friendly_name: String,
    /// Callback
    pub eraser: Arc<dyn PersonalDataEraser>,
}

/// Insertion-ordered registry keyed by machine-readable name
pub struct Registry<T> {
    entries: Vec<(String, T)>,
}

/// Registry of personal data exporters
pub type ExporterRegistry = Registry<ExporterEntry>;

/// Registry of personal data erasers
pub type EraserRegistry = Registry<EraserEntry>;

impl<T> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register an entry, replacing any entry with the same key in place
    pub fn register(&mut self, key: impl Into<String>, entry: T) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Get an entry by key
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Check if a key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Iterate entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Add the budget record exporters to an exporter registry
pub fn register_personal_data_exporters(
    mut exporters: ExporterRegistry,
    store: Arc<dyn DocumentStore>,
    accounts: Arc<dyn AccountDirectory>,
) -> ExporterRegistry {
    exporters.register(
        REIMBURSEMENTS_EXPORTER,
        ExporterEntry {
            friendly_name: "WordCamp Reimbursement Requests".to_string(),
            exporter: Arc::new(RecordExporter::reimbursements(store.clone(), accounts.clone())),
        },
    );
    exporters.register(
        VENDOR_PAYMENTS_EXPORTER,
        ExporterEntry {
            friendly_name: "WordCamp Vendor Payment Requests".to_string(),
            exporter: Arc::new(RecordExporter::vendor_payments(store, accounts)),
        },
    );
    exporters
}

/// Eraser registration for budget records
///
/// Returns the registry untouched. Reimbursement and vendor payment records
/// are kept for accounting and audit, so no eraser is offered for them.
pub fn register_personal_data_erasers(erasers: EraserRegistry) -> EraserRegistry {
    erasers
}

/// Immutable set of registries built at application startup
pub struct PrivacyRegistry {
    exporters: ExporterRegistry,
    erasers: EraserRegistry,
}

impl PrivacyRegistry {
    /// Build both registries against the given host collaborators
    pub fn bootstrap(store: Arc<dyn DocumentStore>, accounts: Arc<dyn AccountDirectory>) -> Self {
        Self::extend(ExporterRegistry::new(), EraserRegistry::new(), store, accounts)
    }

    /// Build on top of registries already populated by other components
    pub fn extend(
        exporters: ExporterRegistry,
        erasers: EraserRegistry,
        store: Arc<dyn DocumentStore>,
        accounts: Arc<dyn AccountDirectory>,
    ) -> Self {
        let exporters = register_personal_data_exporters(exporters, store, accounts);
        let erasers = register_personal_data_erasers(erasers);
        debug!(
            exporters = exporters.len(),
            erasers = erasers.len(),
            "Privacy registry ready"
        );
        Self { exporters, erasers }
    }

    /// Registered exporters
    pub fn exporters(&self) -> &ExporterRegistry {
        &self.exporters
    }

    /// Registered erasers
    pub fn erasers(&self) -> &EraserRegistry {
        &self.erasers
    }
}
