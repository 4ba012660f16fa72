//! JSON snapshot file backing the in-memory store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{PriceReport, Station};

use super::error::StoreError;

/// Every persisted row plus the id counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    /// Last station id handed out.
    pub last_station_id: u64,
    /// Last price report id handed out.
    pub last_report_id: u64,
    /// Stations in insertion order.
    pub stations: Vec<Station>,
    /// Price reports in insertion order.
    pub reports: Vec<PriceReport>,
}

/// Reads and writes [`Tables`] as a JSON file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    /// Create a snapshot handle for the given path. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the tables from disk.
    ///
    /// Returns `None` if the file does not exist. A file that exists but
    /// cannot be parsed is an error, never silently treated as empty.
    pub fn load(&self) -> Result<Option<Tables>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let tables = serde_json::from_str(&contents)?;
        Ok(Some(tables))
    }

    /// Write the tables to disk.
    ///
    /// Creates parent directories if they don't exist. The file is written
    /// beside the target and renamed into place, so a reader never sees a
    /// half-written snapshot.
    pub fn save(&self, tables: &Tables) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(tables)?;

        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, &self.path)?;

        Ok(())
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
