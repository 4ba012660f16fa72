//! Linear-scan proximity search.
//!
//! Every stored station is measured against the query point; there is no
//! spatial index.

use serde::Serialize;

use crate::domain::{Coordinate, Station};

/// A station annotated with its distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStation {
    #[serde(flatten)]
    pub station: Station,

    /// Great-circle distance from the query point, in kilometres.
    pub distance_km: f64,
}

/// Find every station strictly closer than `radius_km` to `origin`.
///
/// Results are ordered nearest first. Stations at equal distance keep the
/// order in which `stations` yielded them.
pub fn find_nearby<'a, I>(stations: I, origin: &Coordinate, radius_km: f64) -> Vec<NearbyStation>
where
    I: IntoIterator<Item = &'a Station>,
{
    let mut nearby: Vec<NearbyStation> = stations
        .into_iter()
        .filter_map(|station| {
            let distance_km = origin.distance_km(&station.location);
            (distance_km < radius_km).then(|| NearbyStation {
                station: station.clone(),
                distance_km,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}

/// Find the station closest to `candidate` that lies strictly within
/// `guard_radius_m` metres of it, if any.
pub fn find_conflict<'a, I>(
    stations: I,
    candidate: &Coordinate,
    guard_radius_m: f64,
) -> Option<&'a Station>
where
    I: IntoIterator<Item = &'a Station>,
{
    stations
        .into_iter()
        .map(|station| (station, candidate.distance_m(&station.location)))
        .filter(|(_, distance_m)| *distance_m < guard_radius_m)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(station, _)| station)
}
