//! Metadata extraction

use super::mapping::meta_mapping;
use crate::types::{ExportField, MetaBag};

/// Labelled values of every mapped field present in a metadata bag
///
/// Fields come out in mapping order. A key that is missing, holds an empty
/// list, or whose first value is empty is skipped.
pub fn extract_meta_details(meta: &MetaBag, prefix: &str) -> Vec<ExportField> {
    meta_mapping(prefix)
        .into_iter()
        .filter_map(|(key, label)| {
            meta.first_value(&key)
                .map(|value| ExportField::new(label, value))
        })
        .collect()
}
