//! Price validation and the derived latest-price view.

mod ledger;
mod validate;

pub use ledger::{latest_prices, sort_newest_first};
pub use validate::{INVALID_FUEL_TYPE, INVALID_PRICE, validate, validate_report};
