//! Snapshot-backed host store

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use wcb_core::error::{PrivacyError, Result};
use wcb_core::host::{AccountDirectory, DocumentStore};
use wcb_core::privacy::{paginate, QueryPage, RecordQuery};
use wcb_core::types::{MetaBag, Record, RecordId, User};

/// Current snapshot file version
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// On-disk snapshot of users, records and record metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// User accounts
    #[serde(default)]
    pub users: Vec<User>,
    /// Records with their metadata
    #[serde(default)]
    pub records: Vec<SnapshotRecord>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            users: Vec::new(),
            records: Vec::new(),
        }
    }
}

/// A record together with its metadata bag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Record fields
    #[serde(flatten)]
    pub record: Record,
    /// Metadata bag
    #[serde(default)]
    pub meta: MetaBag,
}

/// Read-only document store and account directory loaded from a snapshot
pub struct SnapshotStore {
    users: Vec<User>,
    records: Vec<Record>,
    meta: HashMap<RecordId, MetaBag>,
}

impl SnapshotStore {
    /// Load a snapshot file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PrivacyError::FileNotFound(path.to_path_buf())
            } else {
                PrivacyError::Io(e)
            }
        })?;

        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PrivacyError::from(e).with_context(format!("Failed to read {}", path.display())))?;

        let store = Self::from_snapshot(snapshot)?;
        info!(
            "Loaded snapshot {:?} ({} users, {} records)",
            path,
            store.users.len(),
            store.records.len()
        );
        Ok(store)
    }

    /// Build a store from an in-memory snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PrivacyError::InvalidSnapshot(format!(
                "unsupported version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(snapshot.records.len());
        let mut meta = HashMap::with_capacity(snapshot.records.len());

        for entry in snapshot.records {
            if !seen.insert(entry.record.id) {
                warn!("Skipping duplicate record id {}", entry.record.id);
                continue;
            }
            meta.insert(entry.record.id, entry.meta);
            records.push(entry.record);
        }

        Ok(Self {
            users: snapshot.users,
            records,
            meta,
        })
    }

    /// Default snapshot path (platform data directory, or ~/.wcb-privacy)
    pub fn default_location() -> PathBuf {
        directories::ProjectDirs::from("org", "wordcamp", "wcb-privacy")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".wcb-privacy")
            })
            .join("snapshot.json")
    }

    /// Rebuild the snapshot this store was loaded from
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            users: self.users.clone(),
            records: self
                .records
                .iter()
                .map(|record| SnapshotRecord {
                    record: record.clone(),
                    meta: self.meta.get(&record.id).cloned().unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Write the snapshot atomically (write to temp, then rename)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_snapshot(path.as_ref(), &self.to_snapshot())
    }

    /// Number of user accounts
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Write a snapshot file atomically
pub(crate) fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("json.tmp");
    {
        let file = fs::File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PrivacyError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file: {}", e),
        ))
    })?;

    debug!("Saved snapshot to {:?}", path);
    Ok(())
}

impl DocumentStore for SnapshotStore {
    fn query(&self, query: &RecordQuery) -> Result<Option<QueryPage>> {
        Ok(Some(paginate(&self.records, query)))
    }

    fn metadata(&self, id: RecordId) -> Result<MetaBag> {
        Ok(self.meta.get(&id).cloned().unwrap_or_default())
    }
}

impl AccountDirectory for SnapshotStore {
    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(None);
        }
        Ok(self
            .users
            .iter()
            .find(|u| u.email.trim().eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wcb_core::types::{RecordType, UserId};

    const SAMPLE: &str = r#"{
        "version": 1,
        "users": [
            { "id": 7, "email": "Pat@Example.com", "login": "pat" },
            { "id": 8, "email": "sam@example.com" }
        ],
        "records": [
            {
                "id": 42,
                "type": "wcb_reimbursement_request",
                "author": 7,
                "title": "Travel",
                "date": "2023-05-01",
                "status": "wcb-pending",
                "meta": { "_wcbrr_currency": ["EUR"] }
            },
            {
                "id": 43,
                "type": "wcp_payment_request",
                "author": 8,
                "title": "Catering",
                "date": "2023-05-02"
            }
        ]
    }"#;

    fn sample_store() -> SnapshotStore {
        let snapshot: Snapshot = serde_json::from_str(SAMPLE).unwrap();
        SnapshotStore::from_snapshot(snapshot).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let store = sample_store();
        assert_eq!(store.user_count(), 2);
        assert_eq!(store.record_count(), 2);
    }

    #[test]
    fn test_find_by_email_ignores_case_and_whitespace() {
        let store = sample_store();
        let user = store.find_by_email("  pat@example.COM ").unwrap().unwrap();
        assert_eq!(user.id, UserId(7));
        assert!(store.find_by_email("nobody@example.com").unwrap().is_none());
        assert!(store.find_by_email("").unwrap().is_none());
    }

    #[test]
    fn test_query_and_metadata() {
        let store = sample_store();
        let page = store
            .query(&RecordQuery::new(RecordType::ReimbursementRequest, 1, UserId(7)))
            .unwrap()
            .unwrap();
        assert_eq!(page.max_num_pages, 1);
        assert_eq!(page.records[0].id, RecordId(42));

        let meta = store.metadata(RecordId(42)).unwrap();
        assert_eq!(meta.first_value("_wcbrr_currency"), Some("EUR"));
        assert!(store.metadata(RecordId(43)).unwrap().is_empty());
        assert!(store.metadata(RecordId(999)).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let snapshot = Snapshot {
            version: 99,
            ..Snapshot::default()
        };
        let result = SnapshotStore::from_snapshot(snapshot);
        assert!(matches!(result, Err(PrivacyError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_skips_duplicate_records() {
        let mut snapshot: Snapshot = serde_json::from_str(SAMPLE).unwrap();
        let mut duplicate = snapshot.records[0].clone();
        duplicate.record.title = "Duplicate".to_string();
        snapshot.records.push(duplicate);

        let store = SnapshotStore::from_snapshot(snapshot).unwrap();
        assert_eq!(store.record_count(), 2);
        let page = store
            .query(&RecordQuery::new(RecordType::ReimbursementRequest, 1, UserId(7)))
            .unwrap()
            .unwrap();
        assert_eq!(page.records[0].title, "Travel");
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = SnapshotStore::open(temp.path().join("missing.json"));
        assert!(matches!(result, Err(PrivacyError::FileNotFound(_))));
    }

    #[test]
    fn test_open_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SnapshotStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_save_and_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data/snapshot.json");

        let store = sample_store();
        store.save(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = SnapshotStore::open(&path).unwrap();
        assert_eq!(reopened.record_count(), 2);
        assert_eq!(
            reopened.metadata(RecordId(42)).unwrap(),
            store.metadata(RecordId(42)).unwrap()
        );
    }

    #[test]
    fn test_empty_snapshot_is_current_version() {
        let store = SnapshotStore::from_snapshot(Snapshot::default()).unwrap();
        assert_eq!(store.record_count(), 0);
        assert_eq!(store.to_snapshot().version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_default_location() {
        let path = SnapshotStore::default_location();
        assert!(path.ends_with("snapshot.json"));
    }
}
