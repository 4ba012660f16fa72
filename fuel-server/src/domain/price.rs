//! Crowd-sourced price reports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fuel::FuelType;
use super::station::StationId;

/// Price report identifier, increasing in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceReportId(pub u64);

impl fmt::Display for PriceReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single price observation. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    pub id: PriceReportId,
    #[serde(rename = "gas_station_id")]
    pub station_id: StationId,
    pub fuel_type: FuelType,
    pub price: f64,
    pub reported_at: DateTime<Utc>,
}

/// The most recent price for one fuel type at a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatestPrice {
    pub price: f64,
    pub reported_at: DateTime<Utc>,
}

impl From<&PriceReport> for LatestPrice {
    fn from(report: &PriceReport) -> Self {
        Self {
            price: report.price,
            reported_at: report.reported_at,
        }
    }
}
