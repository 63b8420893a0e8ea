//! Personal data exporters for budget records

use super::meta::extract_meta_details;
use super::query::query_page;
use crate::error::Result;
use crate::host::{AccountDirectory, DocumentStore};
use crate::types::{ExportField, ExportItem, ExportPage, Record, RecordType};
use std::sync::Arc;
use tracing::debug;

/// Callback contract of a personal data exporter
///
/// The orchestrator calls `export` with page 1, 2, ... until `done` is true.
/// Unknown users and empty result sets are normal, completed pages; errors
/// only come from the host collaborators.
pub trait PersonalDataExporter: Send + Sync {
    /// Export one page of personal data for an email address
    fn export(&self, email: &str, page: u32) -> Result<ExportPage>;
}

/// Exporter for one budget record type
pub struct RecordExporter {
    record_type: RecordType,
    store: Arc<dyn DocumentStore>,
    accounts: Arc<dyn AccountDirectory>,
}

impl RecordExporter {
    /// Create an exporter for a record type
    pub fn new(
        record_type: RecordType,
        store: Arc<dyn DocumentStore>,
        accounts: Arc<dyn AccountDirectory>,
    ) -> Self {
        Self {
            record_type,
            store,
            accounts,
        }
    }

    /// Exporter for reimbursement requests
    pub fn reimbursements(store: Arc<dyn DocumentStore>, accounts: Arc<dyn AccountDirectory>) -> Self {
        Self::new(RecordType::ReimbursementRequest, store, accounts)
    }

    /// Exporter for vendor payment requests
    pub fn vendor_payments(store: Arc<dyn DocumentStore>, accounts: Arc<dyn AccountDirectory>) -> Self {
        Self::new(RecordType::VendorPayment, store, accounts)
    }

    /// Export one page of records authored by the owner of `email`
    pub fn export_page(&self, email: &str, page: u32) -> Result<ExportPage> {
        let Some(user) = self.accounts.find_by_email(email)? else {
            debug!(record_type = %self.record_type, "No user for export request");
            return Ok(ExportPage::empty_done());
        };

        let page = page.max(1);
        let Some(results) = query_page(self.store.as_ref(), self.record_type, page, user.id)? else {
            debug!(record_type = %self.record_type, page, "Store returned no page");
            return Ok(ExportPage::empty_done());
        };

        let mut data = Vec::with_capacity(results.records.len());
        for record in &results.records {
            if let Some(item) = self.build_item(record)? {
                data.push(item);
            }
        }

        let done = results.max_num_pages <= page;
        debug!(
            record_type = %self.record_type,
            user_id = %user.id,
            page,
            max_num_pages = results.max_num_pages,
            items = data.len(),
            done,
            "Exported page"
        );

        Ok(ExportPage { data, done })
    }

    /// Render a record as an export item
    fn build_item(&self, record: &Record) -> Result<Option<ExportItem>> {
        let meta = self.store.metadata(record.id)?;

        let mut data = vec![
            ExportField::new("Title", record.title.as_str()),
            ExportField::new("Date", record.date.as_str()),
        ];
        data.extend(extract_meta_details(&meta, self.record_type.meta_prefix()));

        if data.is_empty() {
            return Ok(None);
        }

        Ok(Some(ExportItem {
            group_id: self.record_type.as_str().to_string(),
            group_label: self.record_type.group_label().to_string(),
            item_id: record.item_id(),
            data,
        }))
    }
}

impl PersonalDataExporter for RecordExporter {
    fn export(&self, email: &str, page: u32) -> Result<ExportPage> {
        self.export_page(email, page)
    }
}
