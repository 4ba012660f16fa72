//! Fuel types and their accepted price ranges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown fuel type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fuel type: {0:?}")]
pub struct UnknownFuelType(pub String);

/// Inclusive price bounds for one fuel type, in currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Whether `price` lies within the inclusive bounds.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// The closed set of fuels a price can be reported for.
///
/// Serialized in snake_case. The identifiers used by the first mobile
/// clients are accepted as aliases when parsing.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::FuelType;
///
/// let diesel: FuelType = "diesel".parse().unwrap();
/// assert_eq!(diesel.price_range().min, 4.00);
///
/// let legacy: FuelType = "etanol".parse().unwrap();
/// assert_eq!(legacy, FuelType::Ethanol);
///
/// assert!("kerosene".parse::<FuelType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[serde(alias = "gasolina_comum")]
    RegularGasoline,
    #[serde(alias = "gasolina_aditivada")]
    PremiumGasoline,
    #[serde(alias = "etanol")]
    Ethanol,
    Diesel,
}

impl FuelType {
    /// Every fuel type, in declaration order.
    pub const ALL: [FuelType; 4] = [
        FuelType::RegularGasoline,
        FuelType::PremiumGasoline,
        FuelType::Ethanol,
        FuelType::Diesel,
    ];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::RegularGasoline => "regular_gasoline",
            FuelType::PremiumGasoline => "premium_gasoline",
            FuelType::Ethanol => "ethanol",
            FuelType::Diesel => "diesel",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::RegularGasoline => "Regular gasoline",
            FuelType::PremiumGasoline => "Premium gasoline",
            FuelType::Ethanol => "Ethanol",
            FuelType::Diesel => "Diesel",
        }
    }

    /// Accepted price range for this fuel.
    pub fn price_range(&self) -> PriceRange {
        match self {
            FuelType::RegularGasoline => PriceRange {
                min: 4.50,
                max: 8.00,
            },
            FuelType::PremiumGasoline => PriceRange {
                min: 4.80,
                max: 8.50,
            },
            FuelType::Ethanol => PriceRange {
                min: 2.50,
                max: 6.00,
            },
            FuelType::Diesel => PriceRange {
                min: 4.00,
                max: 7.50,
            },
        }
    }
}

impl FromStr for FuelType {
    type Err = UnknownFuelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular_gasoline" | "gasolina_comum" => Ok(FuelType::RegularGasoline),
            "premium_gasoline" | "gasolina_aditivada" => Ok(FuelType::PremiumGasoline),
            "ethanol" | "etanol" => Ok(FuelType::Ethanol),
            "diesel" => Ok(FuelType::Diesel),
            other => Err(UnknownFuelType(other.to_string())),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
