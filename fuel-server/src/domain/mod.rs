//! Domain types for the fuel price service.
//!
//! This module contains the validated value types shared by the proximity
//! search, the price ledger and the store. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod error;
mod fuel;
mod geo;
mod price;
mod station;

pub use error::ValidationErrors;
pub use fuel::{FuelType, PriceRange, UnknownFuelType};
pub use geo::{Coordinate, EARTH_RADIUS_KM, InvalidCoordinate, great_circle_km};
pub use price::{LatestPrice, PriceReport, PriceReportId};
pub use station::{
    MIN_ADDRESS_CHARS, MIN_NAME_CHARS, Station, StationDraft, StationId, parse_location,
};
