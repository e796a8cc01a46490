pub mod classes;
pub mod fare;
pub mod rate;

pub use fare::round2;

use chrono::{DateTime, Utc};

use crate::config::TariffSchedule;
use crate::entities::{PriceEstimate, RouteInfo, TripRequest};
use crate::error::Error;

// The whole pricing pipeline: conditions -> tier -> breakdown -> classes ->
// assembled estimate. Pure and deterministic; the generation instant is an
// argument so identical inputs give byte-identical estimates.
pub fn build_estimate(
    trip: &TripRequest,
    route: RouteInfo,
    schedule: &TariffSchedule,
    generated_at: DateTime<Utc>,
) -> Result<PriceEstimate, Error> {
    let conditions =
        rate::resolve_conditions(schedule, trip.pickup_at, trip.return_at, trip.round_trip);
    let tier = rate::select_tariff(schedule, &conditions)?;
    let breakdown = fare::compute_breakdown(&route, schedule, tier, conditions, trip.round_trip);
    let class_prices = classes::price_classes(&breakdown, schedule, trip, route.is_estimated);

    Ok(PriceEstimate::assemble(
        trip.clone(),
        route,
        breakdown,
        class_prices,
        schedule.currency.clone(),
        generated_at,
    ))
}
