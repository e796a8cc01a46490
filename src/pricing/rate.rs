use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::config::{TariffSchedule, TariffTier};
use crate::entities::{DayType, RateConditions, ReturnType, TimeOfDay};
use crate::error::{configuration_error, Error};

// Classifies the pickup (and return) instant against the schedule's windows.
// Pure: everything is derived from the arguments.
pub fn resolve_conditions(
    schedule: &TariffSchedule,
    pickup_at: NaiveDateTime,
    return_at: Option<NaiveDateTime>,
    round_trip: bool,
) -> RateConditions {
    let time_of_day = classify_time(schedule, pickup_at.time());
    let day_type = classify_day(schedule, pickup_at.date());

    // laden only when the return leg falls in the same rate-relevant window
    // as the pickup; anything else is an empty return, surcharged through
    // the approach fee rather than the tier
    let return_type = match return_at {
        Some(return_at) if round_trip => {
            if classify_time(schedule, return_at.time()) == time_of_day
                && classify_day(schedule, return_at.date()) == day_type
            {
                ReturnType::Laden
            } else {
                ReturnType::Empty
            }
        }
        _ => ReturnType::Empty,
    };

    RateConditions {
        time_of_day,
        day_type,
        return_type,
    }
}

// First matching tier in declared priority order. A schedule that leaves a
// combination uncovered is broken configuration, never a default rate.
pub fn select_tariff<'a>(
    schedule: &'a TariffSchedule,
    conditions: &RateConditions,
) -> Result<&'a TariffTier, Error> {
    schedule
        .tiers
        .iter()
        .find(|tier| tier.conditions.matches(conditions))
        .ok_or_else(|| configuration_error(format!("no tariff tier matches {:?}", conditions)))
}

// Night window is inclusive of its start and exclusive of its end, and may
// wrap past midnight.
fn classify_time(schedule: &TariffSchedule, time: NaiveTime) -> TimeOfDay {
    let is_night = if schedule.night_start > schedule.night_end {
        time >= schedule.night_start || time < schedule.night_end
    } else {
        time >= schedule.night_start && time < schedule.night_end
    };

    if is_night {
        TimeOfDay::Night
    } else {
        TimeOfDay::Day
    }
}

fn classify_day(schedule: &TariffSchedule, date: NaiveDate) -> DayType {
    let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);

    if weekend || is_holiday(schedule, date) {
        DayType::WeekendOrHoliday
    } else {
        DayType::Weekday
    }
}

fn is_holiday(schedule: &TariffSchedule, date: NaiveDate) -> bool {
    schedule
        .recurring_holidays
        .iter()
        .any(|holiday| holiday.month == date.month() && holiday.day == date.day())
        || schedule.holidays.contains(&date)
}
