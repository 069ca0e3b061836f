//! JSON file snapshot store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::models::SnapshotRecord;
use crate::core::ports::{LoadedSnapshot, SnapshotStore, StoreError};

/// Snapshot store backed by a single JSON file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Store at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the stored snapshot, returning whether one existed
    pub fn clear(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> LoadedSnapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No previous snapshot found at {}", self.path.display());
                return LoadedSnapshot::Missing;
            },
            Err(err) => {
                return LoadedSnapshot::Unreadable(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                ));
            },
        };

        match serde_json::from_str::<SnapshotRecord>(&content) {
            Ok(record) => LoadedSnapshot::Found(record),
            Err(err) => LoadedSnapshot::Unreadable(format!(
                "failed to parse {}: {err}",
                self.path.display()
            )),
        }
    }

    fn save(&self, record: &SnapshotRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(record)?;

        // Write to a sibling and rename over the target
        let tmp = self.temp_path();
        fs::write(&tmp, content)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            debug!("Removing {} after failed rename", tmp.display());
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }

        info!("Snapshot saved to {}", self.path.display());
        Ok(())
    }
}
