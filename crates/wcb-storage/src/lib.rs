//! wcb-storage - Storage library for wcb-privacy
//!
//! This crate provides a snapshot-backed implementation of the host
//! document store and account directory.

mod snapshot_store;

pub use snapshot_store::{Snapshot, SnapshotRecord, SnapshotStore, SNAPSHOT_VERSION};
