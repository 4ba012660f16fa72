//! Station and price operations.
//!
//! [`StationService`] is the entry point used by the web layer. Every
//! operation validates its input fully before touching the store, so a
//! rejected request never causes a partial write.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    FuelType, LatestPrice, PriceReport, Station, StationDraft, StationId, ValidationErrors,
    parse_location,
};
use crate::pricing::{latest_prices, sort_newest_first, validate_report};
use crate::proximity::{NearbyStation, ProximityConfig, find_nearby};
use crate::store::{InsertOutcome, Store, StoreError};

/// Source of report timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Errors returned by [`StationService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input broke one or more domain rules; nothing was written
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// No station with this id
    #[error("station {0} not found")]
    NotFound(StationId),

    /// The store failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

/// Proximity search and the price ledger over a [`Store`].
pub struct StationService<S> {
    store: Arc<S>,
    config: ProximityConfig,
    clock: Clock,
}

impl<S> Clone for StationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: Store> StationService<S> {
    /// Create a service over `store`, stamping reports with the system clock.
    pub fn new(store: Arc<S>, config: ProximityConfig) -> Self {
        Self {
            store,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    /// Use a custom clock for report timestamps.
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Stations strictly within `radius_km` of the point, nearest first.
    ///
    /// The radius defaults to the configured one. Any non-negative radius is
    /// accepted, including infinity.
    pub fn search_stations(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyStation>, ServiceError> {
        let mut errors = ValidationErrors::new();

        let origin = match parse_location(latitude, longitude) {
            Ok(origin) => Some(origin),
            Err(messages) => {
                for message in messages {
                    errors.push(message);
                }
                None
            }
        };

        let radius_km = radius_km.unwrap_or(self.config.default_radius_km);
        if radius_km.is_nan() || radius_km < 0.0 {
            errors.push("radius must be a non-negative number");
        }

        let origin = match origin {
            Some(origin) if errors.is_empty() => origin,
            _ => {
                tracing::warn!(%errors, "rejected station search");
                return Err(errors.into());
            }
        };

        let stations = self.store.list_stations()?;
        let nearby = find_nearby(&stations, &origin, radius_km);

        tracing::debug!(
            latitude = origin.latitude(),
            longitude = origin.longitude(),
            radius_km,
            scanned = stations.len(),
            found = nearby.len(),
            "station search"
        );

        Ok(nearby)
    }

    /// Validate and insert a new station.
    ///
    /// Rejected if another station lies within the guard radius. The guard
    /// applies only here, never to updates.
    pub fn create_station(
        &self,
        name: &str,
        address: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Station, ServiceError> {
        let draft = StationDraft::new(name, address, latitude, longitude).inspect_err(|errors| {
            tracing::warn!(%errors, "rejected station");
        })?;

        match self.store.insert_station(draft, self.config.guard_radius_m)? {
            InsertOutcome::Inserted(station) => {
                tracing::info!(id = %station.id, name = %station.name, "created station");
                Ok(station)
            }
            InsertOutcome::Conflict(existing) => {
                let errors = ValidationErrors::single(format!(
                    "a station already exists within {:.0} meters: {} (id {})",
                    self.config.guard_radius_m, existing.name, existing.id
                ));
                tracing::warn!(%errors, "rejected duplicate station");
                Err(errors.into())
            }
        }
    }

    /// Replace a station's name, address and location.
    pub fn update_station(
        &self,
        id: StationId,
        name: &str,
        address: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Station, ServiceError> {
        let draft = StationDraft::new(name, address, latitude, longitude).inspect_err(|errors| {
            tracing::warn!(%id, %errors, "rejected station update");
        })?;

        let station = self
            .store
            .update_station(id, draft)?
            .ok_or(ServiceError::NotFound(id))?;

        tracing::info!(%id, "updated station");
        Ok(station)
    }

    /// Delete a station together with its whole price history.
    pub fn delete_station(&self, id: StationId) -> Result<Station, ServiceError> {
        let station = self
            .store
            .delete_station(id)?
            .ok_or(ServiceError::NotFound(id))?;

        tracing::info!(%id, name = %station.name, "deleted station");
        Ok(station)
    }

    pub fn get_station(&self, id: StationId) -> Result<Station, ServiceError> {
        self.store
            .get_station(id)?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Every report for a station, newest first.
    pub fn list_prices(&self, station_id: StationId) -> Result<Vec<PriceReport>, ServiceError> {
        let mut reports = self
            .store
            .reports_for(station_id)?
            .ok_or(ServiceError::NotFound(station_id))?;
        sort_newest_first(&mut reports);
        Ok(reports)
    }

    /// Validate a price report and append it to the station's ledger.
    ///
    /// The report is either accepted whole or rejected with every violation.
    pub fn report_price(
        &self,
        station_id: StationId,
        fuel_type: &str,
        price: Option<f64>,
    ) -> Result<PriceReport, ServiceError> {
        let (fuel_type, price) = validate_report(fuel_type, price).inspect_err(|errors| {
            tracing::warn!(%station_id, %errors, "rejected price report");
        })?;

        let report = self
            .store
            .append_report(station_id, fuel_type, price, (self.clock)())?
            .ok_or(ServiceError::NotFound(station_id))?;

        tracing::info!(
            %station_id,
            fuel_type = %report.fuel_type,
            fuel = report.fuel_type.label(),
            price = report.price,
            "accepted price report"
        );
        Ok(report)
    }

    /// The most recent price per fuel type, derived from the full ledger.
    pub fn latest_prices(
        &self,
        station_id: StationId,
    ) -> Result<BTreeMap<FuelType, LatestPrice>, ServiceError> {
        let reports = self
            .store
            .reports_for(station_id)?
            .ok_or(ServiceError::NotFound(station_id))?;
        Ok(latest_prices(&reports))
    }
}
