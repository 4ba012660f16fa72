//! Price report validation.

use crate::domain::{FuelType, ValidationErrors};

/// Message for a missing, non-numeric, zero or negative price.
pub const INVALID_PRICE: &str = "price must be a positive number";

/// Message for a fuel type outside the supported set.
pub const INVALID_FUEL_TYPE: &str = "invalid fuel type";

/// Check a raw price report, returning every rule it breaks.
///
/// An empty list means the report is acceptable. The rules are:
///
/// 1. the price must be present, finite and greater than zero; if not, no
///    other price rule is evaluated;
/// 2. the price must lie within the fuel type's inclusive range;
/// 3. the fuel type must be one of the supported values.
///
/// # Examples
///
/// ```
/// use fuel_server::pricing::validate;
///
/// assert!(validate("diesel", Some(5.50)).is_empty());
/// assert_eq!(
///     validate("diesel", Some(3.00)),
///     vec!["price for diesel must be between 4.00 and 7.50"]
/// );
/// assert_eq!(
///     validate("kerosene", None),
///     vec!["price must be a positive number", "invalid fuel type"]
/// );
/// ```
pub fn validate(fuel_type: &str, price: Option<f64>) -> Vec<String> {
    let mut violations = Vec::new();
    let fuel = fuel_type.parse::<FuelType>().ok();

    match price {
        Some(price) if price.is_finite() && price > 0.0 => {
            if let Some(fuel) = fuel {
                let range = fuel.price_range();
                if !range.contains(price) {
                    violations.push(format!(
                        "price for {fuel} must be between {:.2} and {:.2}",
                        range.min, range.max
                    ));
                }
            }
        }
        _ => violations.push(INVALID_PRICE.to_string()),
    }

    if fuel.is_none() {
        violations.push(INVALID_FUEL_TYPE.to_string());
    }

    violations
}

/// Validate a raw report and return its typed parts.
///
/// Either the whole report is accepted or every violation is returned.
pub fn validate_report(
    fuel_type: &str,
    price: Option<f64>,
) -> Result<(FuelType, f64), ValidationErrors> {
    let violations = validate(fuel_type, price);
    match (fuel_type.parse::<FuelType>(), price) {
        (Ok(fuel), Some(price)) if violations.is_empty() => Ok((fuel, price)),
        _ => Err(ValidationErrors::from(violations)),
    }
}
