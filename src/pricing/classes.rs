use rust_decimal::Decimal;

use crate::config::TariffSchedule;
use crate::entities::{FareBreakdown, PriceRange, TripRequest, VehicleClassPrice};
use crate::pricing::fare::round2;

// Projects the base breakdown across the catalog. Classes that cannot seat
// the party or its luggage are dropped so the caller never offers an
// unselectable class.
pub fn price_classes(
    breakdown: &FareBreakdown,
    schedule: &TariffSchedule,
    trip: &TripRequest,
    is_estimated: bool,
) -> Vec<VehicleClassPrice> {
    let band = if is_estimated {
        schedule.uncertainty_band_estimated
    } else {
        schedule.uncertainty_band
    };

    let mut priced: Vec<VehicleClassPrice> = schedule
        .vehicle_classes
        .iter()
        .filter(|class| {
            class.passenger_capacity >= trip.passenger_count
                && class.luggage_capacity >= trip.luggage_count
        })
        .map(|class| {
            let exact = round2(breakdown.total * class.multiplier);

            VehicleClassPrice {
                class_id: class.id.clone(),
                display_name: class.display_name.clone(),
                passenger_capacity: class.passenger_capacity,
                luggage_capacity: class.luggage_capacity,
                multiplier: class.multiplier,
                exact,
                range: PriceRange {
                    min: round2(exact * (Decimal::ONE - band)),
                    max: round2(exact * (Decimal::ONE + band)),
                },
            }
        })
        .collect();

    // stable: equal prices keep catalog order, so identical inputs always
    // produce identical ordering
    priced.sort_by(|a, b| a.exact.cmp(&b.exact));

    priced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RateConditions, RouteInfo, DayType, ReturnType, TimeOfDay};
    use crate::pricing::fare::compute_breakdown;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trip(passengers: u32, luggage: u32) -> TripRequest {
        TripRequest {
            origin_place_id: "ChIJD7fiBh9u5kcRYJSMaMOCCwQ".into(),
            destination_place_id: "ChIJAx7UL8xx5kcRcdWpwDPnvvc".into(),
            pickup_at: NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            round_trip: false,
            return_at: None,
            passenger_count: passengers,
            luggage_count: luggage,
        }
    }

    fn breakdown(schedule: &TariffSchedule) -> FareBreakdown {
        let conditions = RateConditions {
            time_of_day: TimeOfDay::Day,
            day_type: DayType::Weekday,
            return_type: ReturnType::Empty,
        };
        let tier = schedule.tiers.iter().find(|t| t.name == "A").unwrap();

        compute_breakdown(
            &RouteInfo::confirmed(15_000, 1_500, None),
            schedule,
            tier,
            conditions,
            false,
        )
    }

    #[test]
    fn projects_every_class_from_the_breakdown_total() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        let classes = price_classes(&breakdown, &schedule, &trip(2, 1), false);

        assert_eq!(classes.len(), 4);
        for class in &classes {
            assert_eq!(class.exact, round2(breakdown.total * class.multiplier));
        }
        // 35.10 base total
        assert_eq!(classes[0].exact, dec!(38.61));
        assert_eq!(classes[3].exact, dec!(63.18));
    }

    #[test]
    fn classes_are_sorted_ascending_by_exact_price() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        let classes = price_classes(&breakdown, &schedule, &trip(2, 1), false);

        for pair in classes.windows(2) {
            assert!(pair[0].exact <= pair[1].exact);
        }
    }

    #[test]
    fn higher_multipliers_never_price_lower() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        let classes = price_classes(&breakdown, &schedule, &trip(2, 1), false);

        for a in &classes {
            for b in &classes {
                if a.multiplier > b.multiplier {
                    assert!(a.exact >= b.exact);
                }
            }
        }
    }

    #[test]
    fn equal_prices_keep_catalog_order() {
        let mut schedule = TariffSchedule::default();
        schedule.vehicle_classes[1].multiplier = schedule.vehicle_classes[0].multiplier;
        let breakdown = breakdown(&schedule);

        let classes = price_classes(&breakdown, &schedule, &trip(2, 1), false);

        assert_eq!(classes[0].class_id, "eco");
        assert_eq!(classes[1].class_id, "berline");
    }

    #[test]
    fn undersized_classes_are_filtered_out() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        let classes = price_classes(&breakdown, &schedule, &trip(6, 4), false);

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].class_id, "van");
    }

    #[test]
    fn luggage_capacity_filters_independently_of_seats() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        let classes = price_classes(&breakdown, &schedule, &trip(2, 4), false);

        let ids: Vec<&str> = classes.iter().map(|c| c.class_id.as_str()).collect();
        assert_eq!(ids, ["berline", "premium", "van"]);
    }

    #[test]
    fn oversized_parties_get_an_empty_list() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        assert!(price_classes(&breakdown, &schedule, &trip(9, 0), false).is_empty());
    }

    #[test]
    fn estimated_routes_widen_the_range() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        let confirmed = price_classes(&breakdown, &schedule, &trip(2, 1), false);
        let estimated = price_classes(&breakdown, &schedule, &trip(2, 1), true);

        for (narrow, wide) in confirmed.iter().zip(estimated.iter()) {
            assert_eq!(narrow.exact, wide.exact);
            assert!(wide.range.min < narrow.range.min);
            assert!(wide.range.max > narrow.range.max);
        }
    }

    #[test]
    fn range_brackets_the_exact_price() {
        let schedule = TariffSchedule::default();
        let breakdown = breakdown(&schedule);

        for class in price_classes(&breakdown, &schedule, &trip(2, 1), false) {
            assert!(class.range.min <= class.exact);
            assert!(class.exact <= class.range.max);
        }
    }
}
