//! In-process store, optionally persisted to a snapshot file.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::domain::{FuelType, PriceReport, PriceReportId, Station, StationDraft, StationId};
use crate::proximity::find_conflict;

use super::error::StoreError;
use super::snapshot::{Snapshot, Tables};
use super::{InsertOutcome, Store};

/// Thread-safe station and price tables.
///
/// When opened with a snapshot path, every mutation is written to disk
/// before it becomes visible; a failed write leaves the tables unchanged.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    snapshot: Option<Snapshot>,
}

impl MemoryStore {
    /// An empty store that is never persisted.
    pub fn in_memory() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            snapshot: None,
        }
    }

    /// Open a store backed by the snapshot at `path`.
    ///
    /// A missing file opens an empty store; it is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let snapshot = Snapshot::new(path);
        let tables = snapshot.load()?.unwrap_or_default();

        tracing::info!(
            path = %snapshot.path().display(),
            stations = tables.stations.len(),
            reports = tables.reports.len(),
            "opened store"
        );

        Ok(Self {
            tables: RwLock::new(tables),
            snapshot: Some(snapshot),
        })
    }

    /// Write a final snapshot, if persistent. Called once at shutdown.
    pub fn close(&self) -> Result<(), StoreError> {
        if let Some(snapshot) = &self.snapshot {
            let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
            snapshot.save(&tables)?;
            tracing::info!(path = %snapshot.path().display(), "store closed");
        }
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&*tables))
    }

    /// Apply `f` atomically with respect to readers and the snapshot file.
    fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> Result<R, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;

        match &self.snapshot {
            None => Ok(f(&mut *tables)),
            Some(snapshot) => {
                let mut next = tables.clone();
                let result = f(&mut next);
                if next != *tables {
                    snapshot.save(&next)?;
                    *tables = next;
                }
                Ok(result)
            }
        }
    }
}

impl Store for MemoryStore {
    fn list_stations(&self) -> Result<Vec<Station>, StoreError> {
        self.read(|t| t.stations.clone())
    }

    fn get_station(&self, id: StationId) -> Result<Option<Station>, StoreError> {
        self.read(|t| t.stations.iter().find(|s| s.id == id).cloned())
    }

    fn insert_station(
        &self,
        draft: StationDraft,
        guard_radius_m: f64,
    ) -> Result<InsertOutcome, StoreError> {
        self.write(|t| {
            if let Some(existing) = find_conflict(&t.stations, &draft.location(), guard_radius_m) {
                return InsertOutcome::Conflict(existing.clone());
            }

            t.last_station_id += 1;
            let station = Station::from_draft(StationId(t.last_station_id), draft);
            t.stations.push(station.clone());
            InsertOutcome::Inserted(station)
        })
    }

    fn update_station(
        &self,
        id: StationId,
        draft: StationDraft,
    ) -> Result<Option<Station>, StoreError> {
        self.write(|t| {
            let slot = t.stations.iter_mut().find(|s| s.id == id)?;
            *slot = Station::from_draft(id, draft);
            Some(slot.clone())
        })
    }

    fn delete_station(&self, id: StationId) -> Result<Option<Station>, StoreError> {
        self.write(|t| {
            let index = t.stations.iter().position(|s| s.id == id)?;
            let removed = t.stations.remove(index);
            t.reports.retain(|r| r.station_id != id);
            Some(removed)
        })
    }

    fn append_report(
        &self,
        station_id: StationId,
        fuel_type: FuelType,
        price: f64,
        reported_at: DateTime<Utc>,
    ) -> Result<Option<PriceReport>, StoreError> {
        self.write(|t| {
            if !t.stations.iter().any(|s| s.id == station_id) {
                return None;
            }

            t.last_report_id += 1;
            let report = PriceReport {
                id: PriceReportId(t.last_report_id),
                station_id,
                fuel_type,
                price,
                reported_at,
            };
            t.reports.push(report.clone());
            Some(report)
        })
    }

    fn reports_for(&self, station_id: StationId) -> Result<Option<Vec<PriceReport>>, StoreError> {
        self.read(|t| {
            if !t.stations.iter().any(|s| s.id == station_id) {
                return None;
            }
            Some(
                t.reports
                    .iter()
                    .filter(|r| r.station_id == station_id)
                    .cloned()
                    .collect(),
            )
        })
    }
}
