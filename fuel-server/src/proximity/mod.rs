//! Proximity search over stored stations.
//!
//! Answers "which stations are near this point?" and guards station creation
//! against duplicates placed on top of an existing station.

mod config;
mod search;

pub use config::{DEFAULT_GUARD_RADIUS_M, DEFAULT_RADIUS_KM, ProximityConfig};
pub use search::{NearbyStation, find_conflict, find_nearby};

#[cfg(test)]
pub(crate) use search::test_support;
