//! Core type definitions for wcb-privacy

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Numeric identifier of a record in the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two budget record types that carry payee details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// Reimbursement request filed by an organizer
    #[serde(rename = "wcb_reimbursement_request")]
    ReimbursementRequest,
    /// Vendor payment request (sponsor invoices)
    #[serde(rename = "wcp_payment_request")]
    VendorPayment,
}

impl RecordType {
    /// Type identifier used by the document store
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::ReimbursementRequest => "wcb_reimbursement_request",
            RecordType::VendorPayment => "wcp_payment_request",
        }
    }

    /// Prefix shared by every metadata key of this record type
    pub fn meta_prefix(&self) -> &'static str {
        match self {
            RecordType::ReimbursementRequest => "_wcbrr_",
            RecordType::VendorPayment => "_camppayments_",
        }
    }

    /// Label of the export group holding records of this type
    pub fn group_label(&self) -> &'static str {
        match self {
            RecordType::ReimbursementRequest => "WordCamp Reimbursement Request",
            RecordType::VendorPayment => "WordCamp Sponsor Invoices",
        }
    }

    /// All known record types
    pub fn all() -> &'static [RecordType] {
        &[RecordType::ReimbursementRequest, RecordType::VendorPayment]
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = crate::PrivacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| crate::PrivacyError::Validation(format!("Unknown record type: {}", s)))
    }
}

/// A budget record as stored by the host document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record ID
    pub id: RecordId,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Author user ID
    pub author: UserId,
    /// Title
    pub title: String,
    /// Creation date as formatted by the host
    pub date: String,
    /// Workflow status
    #[serde(default)]
    pub status: String,
}

impl Record {
    /// Stable export item identifier: `<type>-<id>`
    pub fn item_id(&self) -> String {
        format!("{}-{}", self.record_type, self.id)
    }
}

/// Metadata attached to a record
///
/// Values are stored as lists; a scalar field keeps its value at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaBag(BTreeMap<String, Vec<String>>);

impl MetaBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Set the raw list of values for a key
    pub fn insert_values(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.0.insert(key.into(), values);
    }

    /// Raw values stored under a key
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Effective scalar value of a key
    ///
    /// Returns `None` when the key is absent, its list is empty, or the first
    /// element is an empty string.
    pub fn first_value(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)?
            .first()
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the bag is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetaBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = MetaBag::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

/// A user account known to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: UserId,
    /// Email address
    pub email: String,
    /// Login name
    #[serde(default)]
    pub login: String,
}

/// One labelled value in an export item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportField {
    /// Human-readable label
    pub name: String,
    /// Value
    pub value: String,
}

impl ExportField {
    /// Create a new field
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One record rendered for a personal data export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem {
    /// Group ID (record type identifier)
    pub group_id: String,
    /// Group label
    pub group_label: String,
    /// Item ID (`<type>-<record id>`)
    pub item_id: String,
    /// Ordered fields
    pub data: Vec<ExportField>,
}

/// Result of one exporter call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPage {
    /// Items found on this page
    pub data: Vec<ExportItem>,
    /// Whether the orchestrator should stop paging
    pub done: bool,
}

impl ExportPage {
    /// Nothing to export, paging complete
    pub fn empty_done() -> Self {
        Self {
            data: Vec::new(),
            done: true,
        }
    }
}

/// Result of one eraser call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErasePage {
    /// Whether any items were removed
    pub items_removed: bool,
    /// Whether any items were kept back
    pub items_retained: bool,
    /// Messages for the requester
    pub messages: Vec<String>,
    /// Whether the orchestrator should stop paging
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_type_identifiers() {
        assert_eq!(RecordType::ReimbursementRequest.as_str(), "wcb_reimbursement_request");
        assert_eq!(RecordType::VendorPayment.as_str(), "wcp_payment_request");
        assert_eq!(RecordType::ReimbursementRequest.meta_prefix(), "_wcbrr_");
        assert_eq!(RecordType::VendorPayment.meta_prefix(), "_camppayments_");
    }

    #[test]
    fn test_record_type_from_str() {
        assert_eq!(
            "wcp_payment_request".parse::<RecordType>().unwrap(),
            RecordType::VendorPayment
        );
        assert!("post".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_record_type_serializes_as_identifier() {
        let json = serde_json::to_string(&RecordType::ReimbursementRequest).unwrap();
        assert_eq!(json, "\"wcb_reimbursement_request\"");
    }

    #[test]
    fn test_item_id() {
        let record = Record {
            id: RecordId(42),
            record_type: RecordType::ReimbursementRequest,
            author: UserId(7),
            title: "Travel".to_string(),
            date: "2023-05-01".to_string(),
            status: "wcb-pending".to_string(),
        };
        assert_eq!(record.item_id(), "wcb_reimbursement_request-42");
    }

    #[test]
    fn test_meta_first_value() {
        let mut bag = MetaBag::new();
        bag.insert("_wcbrr_currency", "EUR");
        bag.insert("_wcbrr_payment_method", "");
        bag.insert_values("_wcbrr_bank_name", Vec::new());
        bag.insert_values("_wcbrr_notes", vec!["".to_string(), "ignored".to_string()]);
        bag.insert("_wcbrr_check_zip_code", "0");

        assert_eq!(bag.first_value("_wcbrr_currency"), Some("EUR"));
        assert_eq!(bag.first_value("_wcbrr_payment_method"), None);
        assert_eq!(bag.first_value("_wcbrr_bank_name"), None);
        assert_eq!(bag.first_value("_wcbrr_notes"), None);
        assert_eq!(bag.first_value("_wcbrr_missing"), None);
        assert_eq!(bag.first_value("_wcbrr_check_zip_code"), Some("0"));
    }

    #[test]
    fn test_meta_bag_json_shape() {
        let bag: MetaBag = [("_wcbrr_currency", "USD")].into_iter().collect();
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"_wcbrr_currency":["USD"]}"#);
    }

    #[test]
    fn test_export_page_shape() {
        let page = ExportPage::empty_done();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [], "done": true }));
    }
}
