//! Data transfer objects for web requests and responses.
//!
//! Request fields are taken loosely: a value of the wrong JSON type counts
//! as missing, so the domain validators report it alongside every other
//! problem instead of the request failing to parse.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::StationId;

/// Query string for a proximity search.
#[derive(Debug, Default, PartialEq)]
pub struct SearchStationsQuery {
    /// Latitude of the query point
    pub lat: Option<f64>,

    /// Longitude of the query point
    pub lng: Option<f64>,

    /// Search radius in kilometres (defaults to the configured radius)
    pub radius: Option<f64>,
}

impl SearchStationsQuery {
    /// Read `lat`, `lng` and `radius` from raw query parameters.
    ///
    /// Empty values count as absent. Values that are present but not
    /// numbers are reported, one message per parameter.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        let query = Self {
            lat: number_param(params, "lat", "latitude must be a number", &mut errors),
            lng: number_param(params, "lng", "longitude must be a number", &mut errors),
            radius: number_param(
                params,
                "radius",
                "radius must be a non-negative number",
                &mut errors,
            ),
        };

        if errors.is_empty() {
            Ok(query)
        } else {
            Err(errors)
        }
    }
}

fn number_param(
    params: &HashMap<String, String>,
    key: &str,
    message: &str,
    errors: &mut Vec<String>,
) -> Option<f64> {
    let raw = params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(message.to_string());
            None
        }
    }
}

/// Body for creating or updating a station.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StationRequest {
    pub name: Option<Value>,
    pub address: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

impl StationRequest {
    pub fn name(&self) -> &str {
        text(&self.name)
    }

    pub fn address(&self) -> &str {
        text(&self.address)
    }

    pub fn latitude(&self) -> Option<f64> {
        number(&self.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        number(&self.longitude)
    }
}

/// Body for reporting a price.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PriceRequest {
    /// Station the price was seen at
    pub gas_station_id: Option<Value>,

    /// Fuel type identifier, e.g. `"diesel"`
    pub fuel_type: Option<Value>,

    /// Price as a JSON number or numeric string
    pub price: Option<Value>,
}

impl PriceRequest {
    /// The station id, from a non-negative integer or a numeric string.
    pub fn station_id(&self) -> Option<StationId> {
        match self.gas_station_id.as_ref()? {
            Value::Number(n) => n.as_u64().map(StationId),
            Value::String(s) => s.trim().parse().ok().map(StationId),
            _ => None,
        }
    }

    pub fn fuel_type(&self) -> &str {
        text(&self.fuel_type)
    }

    /// The price as a number, if it is one.
    ///
    /// Numeric strings are accepted; anything else is treated as missing.
    pub fn price_value(&self) -> Option<f64> {
        number(&self.price)
    }
}

/// A string field; anything that is not a string reads as empty.
fn text(value: &Option<Value>) -> &str {
    match value {
        Some(Value::String(s)) => s,
        _ => "",
    }
}

/// A number or numeric string; anything else reads as missing.
fn number(value: &Option<Value>) -> Option<f64> {
    match value.as_ref()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validation failure response.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    /// Every rule the request broke
    pub errors: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_request(json: &str) -> PriceRequest {
        serde_json::from_str(json).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn price_from_number_or_string() {
        assert_eq!(price_request(r#"{"price": 5.49}"#).price_value(), Some(5.49));
        assert_eq!(price_request(r#"{"price": 5}"#).price_value(), Some(5.0));
        assert_eq!(price_request(r#"{"price": " 5.49 "}"#).price_value(), Some(5.49));
    }

    #[test]
    fn non_numeric_price_is_missing() {
        assert_eq!(price_request(r#"{"price": "cinco"}"#).price_value(), None);
        assert_eq!(price_request(r#"{"price": true}"#).price_value(), None);
        assert_eq!(price_request(r#"{"price": null}"#).price_value(), None);
        assert_eq!(price_request(r#"{}"#).price_value(), None);
    }

    #[test]
    fn price_request_fields() {
        let req = price_request(r#"{"gas_station_id": 3, "fuel_type": "etanol", "price": 3.9}"#);
        assert_eq!(req.station_id(), Some(StationId(3)));
        assert_eq!(req.fuel_type(), "etanol");

        let req = price_request(r#"{"gas_station_id": "12", "fuel_type": 3}"#);
        assert_eq!(req.station_id(), Some(StationId(12)));
        assert_eq!(req.fuel_type(), "");

        let req = price_request(r#"{"gas_station_id": -1}"#);
        assert_eq!(req.station_id(), None);
    }

    #[test]
    fn station_request_missing_fields_default() {
        let req: StationRequest = serde_json::from_str(r#"{"name": "Posto"}"#).unwrap();
        assert_eq!(req.name(), "Posto");
        assert_eq!(req.address(), "");
        assert!(req.latitude().is_none());
    }

    #[test]
    fn station_request_wrong_types_read_as_missing() {
        let req: StationRequest = serde_json::from_str(
            r#"{"name": null, "address": 5, "latitude": "1.5", "longitude": true}"#,
        )
        .unwrap();
        assert_eq!(req.name(), "");
        assert_eq!(req.address(), "");
        assert_eq!(req.latitude(), Some(1.5));
        assert_eq!(req.longitude(), None);
    }

    #[test]
    fn search_query_parses_numbers() {
        let query =
            SearchStationsQuery::from_params(&params(&[("lat", "-23.5"), ("lng", " -46.6 ")]))
                .unwrap();
        assert_eq!(
            query,
            SearchStationsQuery {
                lat: Some(-23.5),
                lng: Some(-46.6),
                radius: None,
            }
        );
    }

    #[test]
    fn search_query_empty_radius_is_absent() {
        let query = SearchStationsQuery::from_params(&params(&[
            ("lat", "1"),
            ("lng", "2"),
            ("radius", ""),
        ]))
        .unwrap();
        assert_eq!(query.radius, None);
    }

    #[test]
    fn search_query_reports_every_bad_number() {
        let errors = SearchStationsQuery::from_params(&params(&[
            ("lat", "abc"),
            ("lng", "1"),
            ("radius", "far"),
        ]))
        .unwrap_err();
        assert_eq!(
            errors,
            vec![
                "latitude must be a number",
                "radius must be a non-negative number",
            ]
        );
    }
}
