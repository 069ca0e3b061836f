//! Snapshot store port
//!
//! Defines how the last observed state is read before a run and written
//! after it.

use thiserror::Error;

use super::super::models::SnapshotRecord;

/// Errors from writing the snapshot record
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be encoded
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result of reading the stored record
///
/// Loading never fails outright. Anything other than [`Self::Found`] means
/// every platform starts cold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedSnapshot {
    /// A readable record from a previous run
    Found(SnapshotRecord),
    /// Nothing stored yet
    Missing,
    /// Something is stored but could not be read or parsed
    Unreadable(String),
}

impl LoadedSnapshot {
    /// Consume into the record, if one was read
    #[must_use]
    pub fn into_record(self) -> Option<SnapshotRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::Missing | Self::Unreadable(_) => None,
        }
    }
}

/// Durable storage for the last known review state
pub trait SnapshotStore {
    /// Read the stored record
    ///
    /// Missing or corrupt data degrades to [`LoadedSnapshot::Missing`] or
    /// [`LoadedSnapshot::Unreadable`].
    fn load(&self) -> LoadedSnapshot;

    /// Replace the stored record
    ///
    /// Must not leave a half-written record behind if interrupted.
    fn save(&self, record: &SnapshotRecord) -> Result<(), StoreError>;
}
