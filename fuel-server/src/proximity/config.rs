//! Proximity search configuration.

/// Default search radius when the caller gives none (kilometres).
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Minimum distance between two stations at creation time (metres).
pub const DEFAULT_GUARD_RADIUS_M: f64 = 50.0;

/// Configuration parameters for proximity search.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityConfig {
    /// Radius used when a search omits one (kilometres).
    pub default_radius_km: f64,

    /// Exclusion radius around existing stations, checked only when a
    /// station is created (metres).
    pub guard_radius_m: f64,
}

impl ProximityConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(default_radius_km: f64, guard_radius_m: f64) -> Self {
        Self {
            default_radius_km,
            guard_radius_m,
        }
    }

    /// Set the default search radius.
    pub fn with_default_radius_km(mut self, radius_km: f64) -> Self {
        self.default_radius_km = radius_km;
        self
    }

    /// Set the duplicate-station guard radius.
    pub fn with_guard_radius_m(mut self, radius_m: f64) -> Self {
        self.guard_radius_m = radius_m;
        self
    }
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_KM, DEFAULT_GUARD_RADIUS_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ProximityConfig::default();

        assert_eq!(config.default_radius_km, 5.0);
        assert_eq!(config.guard_radius_m, 50.0);
    }

    #[test]
    fn custom_config() {
        let config = ProximityConfig::new(10.0, 25.0);
        assert_eq!(config.default_radius_km, 10.0);
        assert_eq!(config.guard_radius_m, 25.0);

        let config = ProximityConfig::default()
            .with_default_radius_km(300.0)
            .with_guard_radius_m(100.0);
        assert_eq!(config.default_radius_km, 300.0);
        assert_eq!(config.guard_radius_m, 100.0);
    }
}
