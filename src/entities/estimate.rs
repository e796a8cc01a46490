use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{RouteInfo, TripRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Day,
    Night,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    WeekendOrHoliday,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    Laden,
    Empty,
}

// The resolved predicate inputs a tariff tier was selected on. Kept on the
// breakdown so a quoted fare can be audited after the fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConditions {
    pub time_of_day: TimeOfDay,
    pub day_type: DayType,
    pub return_type: ReturnType,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub base_fare: Decimal,
    // single outward leg; doubled into the total for round trips
    pub distance_charge: Decimal,
    pub price_per_km: Decimal,
    pub approach_fee: Decimal,
    pub minimum_course: Decimal,
    pub total: Decimal,
    pub is_night_time: bool,
    pub is_weekend_or_holiday: bool,
    pub round_trip: bool,
    pub selected_tariff: String,
    pub conditions: RateConditions,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleClassPrice {
    pub class_id: String,
    pub display_name: String,
    pub passenger_capacity: u32,
    pub luggage_capacity: u32,
    pub multiplier: Decimal,
    pub exact: Decimal,
    pub range: PriceRange,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub trip: TripRequest,
    pub route: RouteInfo,
    pub breakdown: FareBreakdown,
    pub classes: Vec<VehicleClassPrice>,
    pub currency: String,
    pub generated_at: DateTime<Utc>,
}

impl PriceEstimate {
    // Aggregation only: upstream values are never recomputed or rewritten
    // here, which is what keeps an estimate auditable against its breakdown.
    pub fn assemble(
        trip: TripRequest,
        route: RouteInfo,
        breakdown: FareBreakdown,
        classes: Vec<VehicleClassPrice>,
        currency: String,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            trip,
            route,
            breakdown,
            classes,
            currency,
            generated_at,
        }
    }

    pub fn class(&self, class_id: &str) -> Option<&VehicleClassPrice> {
        self.classes.iter().find(|class| class.class_id == class_id)
    }
}

// Storage wrapper: the token is minted at persistence time so the estimate
// itself stays deterministic for identical inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub token: Uuid,
    pub estimate: PriceEstimate,
}

impl EstimateRecord {
    pub fn new(estimate: PriceEstimate) -> Self {
        Self {
            token: Uuid::new_v4(),
            estimate,
        }
    }
}
