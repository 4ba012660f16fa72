//! Views derived from a station's append-only price ledger.
//!
//! Nothing here is stored: the current price of a fuel is recomputed from
//! the full report history on every read.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{FuelType, LatestPrice, PriceReport};

/// Ordering that puts the most recent report first.
///
/// Reports with the same timestamp are ordered by id, so the later insertion
/// counts as more recent.
fn newer_first(a: &PriceReport, b: &PriceReport) -> Ordering {
    b.reported_at
        .cmp(&a.reported_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort reports newest first.
pub fn sort_newest_first(reports: &mut [PriceReport]) {
    reports.sort_by(newer_first);
}

/// The most recent report per fuel type.
///
/// Fuel types with no report are absent from the result.
pub fn latest_prices<'a, I>(reports: I) -> BTreeMap<FuelType, LatestPrice>
where
    I: IntoIterator<Item = &'a PriceReport>,
{
    let mut latest: BTreeMap<FuelType, &PriceReport> = BTreeMap::new();

    for report in reports {
        latest
            .entry(report.fuel_type)
            .and_modify(|current| {
                if newer_first(report, *current) == Ordering::Less {
                    *current = report;
                }
            })
            .or_insert(report);
    }

    latest
        .into_iter()
        .map(|(fuel, report)| (fuel, LatestPrice::from(report)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceReportId, StationId};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, min, 0).unwrap()
    }

    fn report(id: u64, fuel_type: FuelType, price: f64, reported_at: DateTime<Utc>) -> PriceReport {
        PriceReport {
            id: PriceReportId(id),
            station_id: StationId(1),
            fuel_type,
            price,
            reported_at,
        }
    }

    #[test]
    fn no_reports_no_prices() {
        assert!(latest_prices(&Vec::new()).is_empty());
    }

    #[test]
    fn picks_latest_per_fuel() {
        let reports = vec![
            report(1, FuelType::Ethanol, 3.00, at(10, 0)),
            report(2, FuelType::Ethanol, 3.10, at(10, 5)),
            report(3, FuelType::Diesel, 5.00, at(10, 2)),
        ];

        let latest = latest_prices(&reports);
        assert_eq!(latest.len(), 2);
        assert_eq!(
            latest[&FuelType::Ethanol],
            LatestPrice {
                price: 3.10,
                reported_at: at(10, 5)
            }
        );
        assert_eq!(
            latest[&FuelType::Diesel],
            LatestPrice {
                price: 5.00,
                reported_at: at(10, 2)
            }
        );
        assert!(!latest.contains_key(&FuelType::RegularGasoline));
    }

    #[test]
    fn input_order_does_not_matter() {
        let reports = vec![
            report(2, FuelType::Ethanol, 3.10, at(10, 5)),
            report(1, FuelType::Ethanol, 3.00, at(10, 0)),
        ];
        assert_eq!(latest_prices(&reports)[&FuelType::Ethanol].price, 3.10);
    }

    #[test]
    fn same_timestamp_prefers_later_insertion() {
        let reports = vec![
            report(7, FuelType::Diesel, 5.20, at(9, 0)),
            report(4, FuelType::Diesel, 5.00, at(9, 0)),
        ];
        assert_eq!(latest_prices(&reports)[&FuelType::Diesel].price, 5.20);
    }

    #[test]
    fn newest_first_order() {
        let mut reports = vec![
            report(1, FuelType::Ethanol, 3.00, at(10, 0)),
            report(2, FuelType::Ethanol, 3.10, at(10, 5)),
            report(3, FuelType::Diesel, 5.00, at(10, 2)),
            report(4, FuelType::Diesel, 5.10, at(10, 2)),
        ];
        sort_newest_first(&mut reports);

        let ids: Vec<u64> = reports.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn latest_price_json_shape() {
        let reports = vec![report(1, FuelType::RegularGasoline, 5.79, at(8, 30))];
        let json = serde_json::to_value(latest_prices(&reports)).unwrap();

        assert_eq!(json["regular_gasoline"]["price"], 5.79);
        assert_eq!(
            json["regular_gasoline"]["reported_at"],
            "2024-03-15T08:30:00Z"
        );
    }
}
