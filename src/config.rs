use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::entities::{DayType, RateConditions, ReturnType, TimeOfDay};
use crate::error::{configuration_error, Error};

pub const SCHEDULE_PATH_VAR: &str = "TARIFF_SCHEDULE_PATH";

// A tier predicate. None on an axis matches anything; tiers are tried in
// declared order and the first match wins, so the declared set must cover
// every reachable combination.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TierConditions {
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default)]
    pub day_type: Option<DayType>,
    #[serde(default)]
    pub return_type: Option<ReturnType>,
}

impl TierConditions {
    pub fn matches(&self, resolved: &RateConditions) -> bool {
        self.time_of_day.map_or(true, |v| v == resolved.time_of_day)
            && self.day_type.map_or(true, |v| v == resolved.day_type)
            && self.return_type.map_or(true, |v| v == resolved.return_type)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TariffTier {
    pub name: String,
    pub base_fare: Decimal,
    pub price_per_km: Decimal,
    pub conditions: TierConditions,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleClass {
    pub id: String,
    pub display_name: String,
    pub passenger_capacity: u32,
    pub luggage_capacity: u32,
    pub multiplier: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

// The full rule table the engine prices against. Externally supplied (JSON
// file named by TARIFF_SCHEDULE_PATH) so tariff revisions ship without code
// changes; the compiled-in default carries the current published rates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TariffSchedule {
    pub currency: String,
    pub timezone: Tz,
    pub night_start: NaiveTime,
    pub night_end: NaiveTime,
    #[serde(default)]
    pub recurring_holidays: Vec<MonthDay>,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    pub minimum_course: Decimal,
    pub approach_fee: Decimal,
    pub uncertainty_band: Decimal,
    pub uncertainty_band_estimated: Decimal,
    pub tiers: Vec<TariffTier>,
    pub vehicle_classes: Vec<VehicleClass>,
}

impl Default for TariffSchedule {
    fn default() -> Self {
        Self {
            currency: "EUR".into(),
            timezone: Tz::Europe__Paris,
            night_start: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            night_end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            // fixed French public holidays; movable feasts go in `holidays`
            recurring_holidays: vec![
                MonthDay { month: 1, day: 1 },
                MonthDay { month: 5, day: 1 },
                MonthDay { month: 5, day: 8 },
                MonthDay { month: 7, day: 14 },
                MonthDay { month: 8, day: 15 },
                MonthDay { month: 11, day: 1 },
                MonthDay { month: 11, day: 11 },
                MonthDay { month: 12, day: 25 },
            ],
            holidays: vec![],
            minimum_course: dec!(20.00),
            approach_fee: dec!(10.00),
            uncertainty_band: dec!(0.05),
            uncertainty_band_estimated: dec!(0.15),
            tiers: vec![
                TariffTier {
                    name: "B".into(),
                    base_fare: dec!(2.60),
                    price_per_km: dec!(1.95),
                    conditions: TierConditions {
                        time_of_day: Some(TimeOfDay::Night),
                        day_type: None,
                        return_type: None,
                    },
                },
                TariffTier {
                    name: "B".into(),
                    base_fare: dec!(2.60),
                    price_per_km: dec!(1.95),
                    conditions: TierConditions {
                        time_of_day: None,
                        day_type: Some(DayType::WeekendOrHoliday),
                        return_type: None,
                    },
                },
                TariffTier {
                    name: "A".into(),
                    base_fare: dec!(2.60),
                    price_per_km: dec!(1.50),
                    conditions: TierConditions {
                        time_of_day: None,
                        day_type: None,
                        return_type: None,
                    },
                },
            ],
            vehicle_classes: vec![
                VehicleClass {
                    id: "eco".into(),
                    display_name: "Éco".into(),
                    passenger_capacity: 4,
                    luggage_capacity: 3,
                    multiplier: dec!(1.10),
                },
                VehicleClass {
                    id: "berline".into(),
                    display_name: "Berline".into(),
                    passenger_capacity: 4,
                    luggage_capacity: 4,
                    multiplier: dec!(1.30),
                },
                VehicleClass {
                    id: "premium".into(),
                    display_name: "Premium".into(),
                    passenger_capacity: 4,
                    luggage_capacity: 4,
                    multiplier: dec!(1.50),
                },
                VehicleClass {
                    id: "van".into(),
                    display_name: "Van".into(),
                    passenger_capacity: 7,
                    luggage_capacity: 8,
                    multiplier: dec!(1.80),
                },
            ],
        }
    }
}

impl TariffSchedule {
    pub fn load() -> Result<Self, Error> {
        let schedule: Self = match env::var(SCHEDULE_PATH_VAR) {
            Ok(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            Err(env::VarError::NotPresent) => Self::default(),
            Err(err) => return Err(err.into()),
        };

        schedule.validate()?;

        Ok(schedule)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.tiers.is_empty() {
            return Err(configuration_error("tariff schedule declares no tiers"));
        }

        if self.vehicle_classes.is_empty() {
            return Err(configuration_error(
                "tariff schedule declares no vehicle classes",
            ));
        }

        for tier in &self.tiers {
            if tier.base_fare < Decimal::ZERO || tier.price_per_km <= Decimal::ZERO {
                return Err(configuration_error(format!(
                    "tariff tier {} has a negative base fare or non-positive km rate",
                    tier.name
                )));
            }
        }

        if self.minimum_course < Decimal::ZERO || self.approach_fee < Decimal::ZERO {
            return Err(configuration_error(
                "minimum course and approach fee must not be negative",
            ));
        }

        if self.uncertainty_band < Decimal::ZERO
            || self.uncertainty_band_estimated < self.uncertainty_band
            || self.uncertainty_band_estimated >= Decimal::ONE
        {
            return Err(configuration_error(
                "uncertainty bands must satisfy 0 <= confirmed <= estimated < 1",
            ));
        }

        // declared catalog order is the luxury-tier order; a decreasing
        // multiplier would let classes invert in price
        for pair in self.vehicle_classes.windows(2) {
            if pair[1].multiplier < pair[0].multiplier {
                return Err(configuration_error(format!(
                    "vehicle class {} undercuts the multiplier of {}",
                    pair[1].id, pair[0].id
                )));
            }
        }

        Ok(())
    }

    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_is_valid() {
        assert!(TariffSchedule::default().validate().is_ok());
    }

    #[test]
    fn default_schedule_covers_every_condition_combination() {
        let schedule = TariffSchedule::default();

        for time_of_day in [TimeOfDay::Day, TimeOfDay::Night] {
            for day_type in [DayType::Weekday, DayType::WeekendOrHoliday] {
                for return_type in [ReturnType::Laden, ReturnType::Empty] {
                    let resolved = RateConditions {
                        time_of_day,
                        day_type,
                        return_type,
                    };

                    assert!(
                        schedule.tiers.iter().any(|tier| tier.conditions.matches(&resolved)),
                        "no tier for {:?}",
                        resolved
                    );
                }
            }
        }
    }

    #[test]
    fn rejects_empty_tier_table() {
        let mut schedule = TariffSchedule::default();
        schedule.tiers.clear();

        assert_eq!(schedule.validate().unwrap_err().code, 10);
    }

    #[test]
    fn rejects_decreasing_class_multipliers() {
        let mut schedule = TariffSchedule::default();
        schedule.vehicle_classes.swap(0, 3);

        assert_eq!(schedule.validate().unwrap_err().code, 10);
    }

    #[test]
    fn rejects_narrower_estimated_band() {
        let mut schedule = TariffSchedule::default();
        schedule.uncertainty_band_estimated = dec!(0.01);

        assert_eq!(schedule.validate().unwrap_err().code, 10);
    }

    #[test]
    fn schedule_round_trips_through_json() {
        let schedule = TariffSchedule::default();
        let json = serde_json::to_string(&schedule).unwrap();
        let reloaded: TariffSchedule = serde_json::from_str(&json).unwrap();

        assert!(reloaded.validate().is_ok());
        assert_eq!(reloaded.tiers.len(), schedule.tiers.len());
        assert_eq!(reloaded.timezone, schedule.timezone);
    }

    #[test]
    fn wildcard_conditions_match_everything() {
        let wildcard = TierConditions {
            time_of_day: None,
            day_type: None,
            return_type: None,
        };
        let resolved = RateConditions {
            time_of_day: TimeOfDay::Night,
            day_type: DayType::WeekendOrHoliday,
            return_type: ReturnType::Laden,
        };

        assert!(wildcard.matches(&resolved));
    }
}
