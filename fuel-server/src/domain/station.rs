//! Fuel stations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationErrors;
use super::geo::Coordinate;

/// Minimum station name length, in characters after trimming.
pub const MIN_NAME_CHARS: usize = 3;

/// Minimum address length, in characters after trimming.
pub const MIN_ADDRESS_CHARS: usize = 10;

/// Opaque station identifier.
///
/// Assigned by the store on insertion and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub location: Coordinate,
}

impl Station {
    /// Build a station from an id and validated attributes.
    pub fn from_draft(id: StationId, draft: StationDraft) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            location: draft.location,
        }
    }
}

/// Validated station attributes, ready to insert or apply as an update.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::StationDraft;
///
/// let draft =
///     StationDraft::new("  Posto Central ", "Av. Paulista, 1000", Some(-23.56), Some(-46.65))
///         .unwrap();
/// assert_eq!(draft.name(), "Posto Central");
///
/// let errors = StationDraft::new("ab", "short", None, Some(-46.65)).unwrap_err();
/// assert_eq!(errors.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StationDraft {
    name: String,
    address: String,
    location: Coordinate,
}

impl StationDraft {
    /// Validate raw station input, collecting every violation.
    ///
    /// Name and address are trimmed before their length is checked and are
    /// stored trimmed.
    pub fn new(
        name: &str,
        address: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = name.trim();
        if name.chars().count() < MIN_NAME_CHARS {
            errors.push(format!(
                "name must have at least {MIN_NAME_CHARS} characters"
            ));
        }

        let address = address.trim();
        if address.chars().count() < MIN_ADDRESS_CHARS {
            errors.push(format!(
                "address must have at least {MIN_ADDRESS_CHARS} characters"
            ));
        }

        let location = match parse_location(latitude, longitude) {
            Ok(location) => Some(location),
            Err(messages) => {
                for message in messages {
                    errors.push(message);
                }
                None
            }
        };

        match location {
            Some(location) if errors.is_empty() => Ok(Self {
                name: name.to_string(),
                address: address.to_string(),
                location,
            }),
            _ => Err(errors),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }
}

/// Check a possibly-missing latitude/longitude pair.
///
/// Returns one message per missing or out-of-range component.
pub fn parse_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Coordinate, Vec<String>> {
    let mut errors = Vec::new();

    match latitude {
        None => errors.push("latitude is required".to_string()),
        Some(lat) if !(-90.0..=90.0).contains(&lat) => {
            errors.push("latitude must be between -90 and 90".to_string())
        }
        Some(_) => {}
    }
    match longitude {
        None => errors.push("longitude is required".to_string()),
        Some(lng) if !(-180.0..=180.0).contains(&lng) => {
            errors.push("longitude must be between -180 and 180".to_string())
        }
        Some(_) => {}
    }

    match (latitude, longitude) {
        (Some(lat), Some(lng)) if errors.is_empty() => {
            Coordinate::new(lat, lng).map_err(|e| vec![e.reason().to_string()])
        }
        _ => Err(errors),
    }
}
