//! Host collaborator traits
//!
//! The document store and the account directory belong to the host
//! platform. Exporters only read through these traits.

use crate::error::Result;
use crate::privacy::query::{QueryPage, RecordQuery};
use crate::types::{MetaBag, RecordId, User};

/// Read access to budget records and their metadata
pub trait DocumentStore: Send + Sync {
    /// Run a filtered, paginated record query
    ///
    /// `None` means the store produced no page object at all.
    fn query(&self, query: &RecordQuery) -> Result<Option<QueryPage>>;

    /// Full metadata bag of a record (empty if it has none)
    fn metadata(&self, id: RecordId) -> Result<MetaBag>;
}

/// Lookup of user accounts
pub trait AccountDirectory: Send + Sync {
    /// Find the user registered with an email address
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// In-memory host for testing
#[cfg(test)]
pub mod memory {
    use super::*;
    use crate::privacy::query::paginate;
    use crate::types::{Record, UserId};
    use crate::PrivacyError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// In-memory document store and account directory
    #[derive(Default)]
    pub struct MemoryHost {
        users: RwLock<Vec<User>>,
        records: RwLock<Vec<Record>>,
        meta: RwLock<HashMap<RecordId, MetaBag>>,
        queries: AtomicUsize,
        /// Return `Ok(None)` from every query
        pub withhold_pages: bool,
        /// Fail every query with a storage error
        pub fail_queries: bool,
    }

    impl MemoryHost {
        /// Create an empty host
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a user
        pub fn add_user(&self, id: u64, email: &str) -> UserId {
            let user = User {
                id: UserId(id),
                email: email.to_string(),
                login: email.split('@').next().unwrap_or_default().to_string(),
            };
            self.users.write().unwrap().push(user);
            UserId(id)
        }

        /// Store a record with its metadata
        pub fn add_record(&self, record: Record, meta: MetaBag) {
            self.meta.write().unwrap().insert(record.id, meta);
            self.records.write().unwrap().push(record);
        }

        /// Number of queries served so far
        pub fn query_count(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }
    }

    impl DocumentStore for MemoryHost {
        fn query(&self, query: &RecordQuery) -> Result<Option<QueryPage>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            if self.fail_queries {
                return Err(PrivacyError::Storage("query failed".to_string()));
            }
            if self.withhold_pages {
                return Ok(None);
            }
            let records = self.records.read().unwrap();
            Ok(Some(paginate(records.iter(), query)))
        }

        fn metadata(&self, id: RecordId) -> Result<MetaBag> {
            Ok(self.meta.read().unwrap().get(&id).cloned().unwrap_or_default())
        }
    }

    impl AccountDirectory for MemoryHost {
        fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            let users = self.users.read().unwrap();
            Ok(users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
                .cloned())
        }
    }
}
