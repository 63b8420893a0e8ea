//! Paginated record queries

use crate::error::Result;
use crate::host::DocumentStore;
use crate::types::{Record, RecordType, UserId};
use tracing::warn;

/// Fixed number of records per export page
pub const RECORDS_PER_PAGE: usize = 20;

/// Filter and page selection sent to the document store
///
/// Records of every status match; only type and author narrow the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    /// Record type to match
    pub record_type: RecordType,
    /// Exact author to match
    pub author: UserId,
    /// Records per page
    pub per_page: usize,
    /// 1-based page number
    pub page: u32,
}

impl RecordQuery {
    /// Query for one page of records of any status by an author
    ///
    /// Page 0 is treated as page 1.
    pub fn new(record_type: RecordType, page: u32, author: UserId) -> Self {
        Self {
            record_type,
            author,
            per_page: RECORDS_PER_PAGE,
            page: page.max(1),
        }
    }

    /// Check whether a record passes the filter (ignoring pagination)
    pub fn matches(&self, record: &Record) -> bool {
        record.record_type == self.record_type && record.author == self.author
    }

    /// Index of the first record on the requested page
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.per_page)
    }
}

/// One page of query results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPage {
    /// Records on this page
    pub records: Vec<Record>,
    /// Number of records matching the filter across all pages
    pub found: usize,
    /// Number of pages for the filter (0 when nothing matches)
    pub max_num_pages: u32,
}

/// Fetch one page of records of a type authored by a user
///
/// Records the store returns outside the filter are dropped, so a page
/// never carries another author's data.
pub fn query_page(
    store: &dyn DocumentStore,
    record_type: RecordType,
    page: u32,
    author: UserId,
) -> Result<Option<QueryPage>> {
    let query = RecordQuery::new(record_type, page, author);
    let Some(mut results) = store.query(&query)? else {
        return Ok(None);
    };

    let before = results.records.len();
    results.records.retain(|record| query.matches(record));
    if results.records.len() != before {
        warn!(
            record_type = %record_type,
            author = %author,
            dropped = before - results.records.len(),
            "Store returned records outside the query filter"
        );
    }
    Ok(Some(results))
}

/// Apply a query to an in-process record set
///
/// Matching records are ordered newest first (date, then id, descending)
/// before the requested page is sliced out.
pub fn paginate<'a>(records: impl IntoIterator<Item = &'a Record>, query: &RecordQuery) -> QueryPage {
    let mut matching: Vec<&Record> = records.into_iter().filter(|r| query.matches(r)).collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let found = matching.len();
    let per_page = query.per_page.max(1);
    let max_num_pages = found.div_ceil(per_page) as u32;

    let records = matching
        .into_iter()
        .skip(query.offset())
        .take(per_page)
        .cloned()
        .collect();

    QueryPage {
        records,
        found,
        max_num_pages,
    }
}
