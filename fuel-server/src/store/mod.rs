//! Persistence for stations and their price ledgers.
//!
//! The [`Store`] trait is the storage handle the service is built on. It
//! owns two related tables: stations, and price reports keyed to a station.
//! Deleting a station deletes its reports in the same operation.

mod error;
mod memory;
mod snapshot;

use chrono::{DateTime, Utc};

use crate::domain::{FuelType, PriceReport, Station, StationDraft, StationId};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use snapshot::{Snapshot, Tables};

/// Result of inserting a station.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The station was stored under a fresh id.
    Inserted(Station),
    /// An existing station lies within the exclusion radius; nothing was stored.
    Conflict(Station),
}

/// Storage handle for stations and price reports.
///
/// Implementations must make each method atomic: in particular the exclusion
/// check in [`Store::insert_station`] and the cascade in
/// [`Store::delete_station`] are never observed half-done.
pub trait Store: Send + Sync {
    /// All stations, in insertion order.
    fn list_stations(&self) -> Result<Vec<Station>, StoreError>;

    fn get_station(&self, id: StationId) -> Result<Option<Station>, StoreError>;

    /// Insert a station unless another lies within `guard_radius_m` metres.
    fn insert_station(
        &self,
        draft: StationDraft,
        guard_radius_m: f64,
    ) -> Result<InsertOutcome, StoreError>;

    /// Replace a station's attributes. `None` if it does not exist.
    fn update_station(
        &self,
        id: StationId,
        draft: StationDraft,
    ) -> Result<Option<Station>, StoreError>;

    /// Remove a station and every report for it. `None` if it does not exist.
    fn delete_station(&self, id: StationId) -> Result<Option<Station>, StoreError>;

    /// Append a report to a station's ledger. `None` if the station does not exist.
    fn append_report(
        &self,
        station_id: StationId,
        fuel_type: FuelType,
        price: f64,
        reported_at: DateTime<Utc>,
    ) -> Result<Option<PriceReport>, StoreError>;

    /// Every report for a station, in insertion order. `None` if the station
    /// does not exist.
    fn reports_for(&self, station_id: StationId) -> Result<Option<Vec<PriceReport>>, StoreError>;
}
