use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{TariffSchedule, TariffTier};
use crate::entities::{DayType, FareBreakdown, RateConditions, RouteInfo, TimeOfDay};

// Commercial rounding to cents. Applied at every computation point, not only
// at display time, so the breakdown fields sum exactly to the total.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn compute_breakdown(
    route: &RouteInfo,
    schedule: &TariffSchedule,
    tier: &TariffTier,
    conditions: RateConditions,
    round_trip: bool,
) -> FareBreakdown {
    let distance_charge = round2(route.distance_km() * tier.price_per_km);

    // a round trip is a doubled outward leg; only symmetric returns are
    // modeled, a distinct return route would be a second engagement
    let mut subtotal = tier.base_fare + distance_charge;
    if round_trip {
        subtotal += distance_charge;
    }

    // approach fee covers dead mileage to the pickup point, charged once
    // per engagement, round trip or not
    let total = round2(subtotal + schedule.approach_fee).max(schedule.minimum_course);

    FareBreakdown {
        base_fare: tier.base_fare,
        distance_charge,
        price_per_km: tier.price_per_km,
        approach_fee: schedule.approach_fee,
        minimum_course: schedule.minimum_course,
        total,
        is_night_time: conditions.time_of_day == TimeOfDay::Night,
        is_weekend_or_holiday: conditions.day_type == DayType::WeekendOrHoliday,
        round_trip,
        selected_tariff: tier.name.clone(),
        conditions,
    }
}
