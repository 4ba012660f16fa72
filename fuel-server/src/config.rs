//! Process configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::proximity::ProximityConfig;

/// Default listening port.
const DEFAULT_PORT: u16 = 5000;

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind (`FUEL_BIND_ADDR`)
    pub bind_addr: IpAddr,

    /// Port to listen on (`PORT`)
    pub port: u16,

    /// Snapshot file for the store (`FUEL_DATA_FILE`); in-memory only if unset
    pub data_file: Option<PathBuf>,

    /// Search and guard radii (`FUEL_DEFAULT_RADIUS_KM`, `FUEL_GUARD_RADIUS_M`)
    pub proximity: ProximityConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("FUEL_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|_| ConfigError {
                var: "FUEL_BIND_ADDR",
                value: value.clone(),
                reason: "expected an IP address",
            })?;
        }

        if let Some(value) = lookup("PORT") {
            let port = value.parse().map_err(|_| ConfigError {
                var: "PORT",
                value: value.clone(),
                reason: "expected a port number",
            })?;
            config = config.with_port(port);
        }

        if let Some(value) = lookup("FUEL_DATA_FILE").filter(|v| !v.is_empty()) {
            config = config.with_data_file(value);
        }

        if let Some(value) = lookup("FUEL_DEFAULT_RADIUS_KM") {
            let radius_km = parse_distance("FUEL_DEFAULT_RADIUS_KM", &value)?;
            config.proximity = config.proximity.with_default_radius_km(radius_km);
        }

        if let Some(value) = lookup("FUEL_GUARD_RADIUS_M") {
            let radius_m = parse_distance("FUEL_GUARD_RADIUS_M", &value)?;
            config.proximity = config.proximity.with_guard_radius_m(radius_m);
        }

        Ok(config)
    }

    /// Set the snapshot file.
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    /// Set the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// The socket address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            data_file: None,
            proximity: ProximityConfig::default(),
        }
    }
}

fn parse_distance(var: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(distance) if distance.is_finite() && distance >= 0.0 => Ok(distance),
        _ => Err(ConfigError {
            var,
            value: value.to_string(),
            reason: "expected a non-negative number",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert!(config.data_file.is_none());
        assert_eq!(config.proximity, ProximityConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = from_vars(&[
            ("FUEL_BIND_ADDR", "0.0.0.0"),
            ("PORT", "8080"),
            ("FUEL_DATA_FILE", "/var/lib/fuel/data.json"),
            ("FUEL_DEFAULT_RADIUS_KM", "300"),
            ("FUEL_GUARD_RADIUS_M", "75.5"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.data_file,
            Some(PathBuf::from("/var/lib/fuel/data.json"))
        );
        assert_eq!(config.proximity.default_radius_km, 300.0);
        assert_eq!(config.proximity.guard_radius_m, 75.5);
    }

    #[test]
    fn empty_data_file_means_in_memory() {
        let config = from_vars(&[("FUEL_DATA_FILE", "")]).unwrap();
        assert!(config.data_file.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        let err = from_vars(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.var, "PORT");
        assert_eq!(
            err.to_string(),
            "invalid value \"eighty\" for PORT: expected a port number"
        );

        let err = from_vars(&[("FUEL_GUARD_RADIUS_M", "-5")]).unwrap_err();
        assert_eq!(err.var, "FUEL_GUARD_RADIUS_M");

        let err = from_vars(&[("FUEL_BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.var, "FUEL_BIND_ADDR");
    }

    #[test]
    fn builders() {
        let config = ServerConfig::default()
            .with_port(3000)
            .with_data_file("fuel.json");
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_file, Some(PathBuf::from("fuel.json")));
    }
}
