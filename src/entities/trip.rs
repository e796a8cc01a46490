use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{validation_error, Error};

// Date-times are business-local wall clock, exactly as posted by the booking
// form. The schedule's timezone is only needed to obtain "now".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin_place_id: String,
    pub destination_place_id: String,
    pub pickup_at: NaiveDateTime,
    #[serde(default)]
    pub round_trip: bool,
    #[serde(default)]
    pub return_at: Option<NaiveDateTime>,
    pub passenger_count: u32,
    #[serde(default)]
    pub luggage_count: u32,
}

impl TripRequest {
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), Error> {
        if self.origin_place_id.is_empty() || self.destination_place_id.is_empty() {
            return Err(validation_error("pickup and dropoff locations are required"));
        }

        if self.origin_place_id == self.destination_place_id {
            return Err(validation_error("pickup and dropoff locations must differ"));
        }

        if self.pickup_at < now {
            return Err(validation_error("pickup time is in the past"));
        }

        if self.passenger_count == 0 {
            return Err(validation_error("at least one passenger is required"));
        }

        match self.return_at {
            None if self.round_trip => Err(validation_error("round trips require a return time")),
            Some(return_at) if self.round_trip && return_at < self.pickup_at => {
                Err(validation_error("return time is before pickup"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> TripRequest {
        TripRequest {
            origin_place_id: "ChIJD7fiBh9u5kcRYJSMaMOCCwQ".into(),
            destination_place_id: "ChIJAx7UL8xx5kcRcdWpwDPnvvc".into(),
            pickup_at: NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            round_trip: false,
            return_at: None,
            passenger_count: 2,
            luggage_count: 2,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn accepts_a_valid_one_way_request() {
        assert!(request().validate(now()).is_ok());
    }

    #[test]
    fn accepts_a_valid_round_trip() {
        let mut trip = request();
        trip.round_trip = true;
        trip.return_at = trip.pickup_at.checked_add_signed(chrono::Duration::hours(6));

        assert!(trip.validate(now()).is_ok());
    }

    #[test]
    fn rejects_missing_locations() {
        let mut trip = request();
        trip.destination_place_id = "".into();

        assert_eq!(trip.validate(now()).unwrap_err().code, 102);
    }

    #[test]
    fn rejects_identical_locations() {
        let mut trip = request();
        trip.destination_place_id = trip.origin_place_id.clone();

        assert_eq!(trip.validate(now()).unwrap_err().code, 102);
    }

    #[test]
    fn rejects_pickup_in_the_past() {
        let trip = request();
        let late = NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(14, 0, 1)
            .unwrap();

        assert_eq!(trip.validate(late).unwrap_err().code, 102);
    }

    #[test]
    fn rejects_round_trip_without_return_time() {
        let mut trip = request();
        trip.round_trip = true;

        assert_eq!(trip.validate(now()).unwrap_err().code, 102);
    }

    #[test]
    fn rejects_return_before_pickup() {
        let mut trip = request();
        trip.round_trip = true;
        trip.return_at = trip.pickup_at.checked_sub_signed(chrono::Duration::hours(1));

        assert_eq!(trip.validate(now()).unwrap_err().code, 102);
    }

    #[test]
    fn rejects_zero_passengers() {
        let mut trip = request();
        trip.passenger_count = 0;

        assert_eq!(trip.validate(now()).unwrap_err().code, 102);
    }

    #[test]
    fn ignores_stale_return_time_on_one_way_trips() {
        let mut trip = request();
        trip.return_at = trip.pickup_at.checked_sub_signed(chrono::Duration::hours(1));

        assert!(trip.validate(now()).is_ok());
    }
}
