use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{PriceEstimate, TripRequest, VehicleClassPrice};
use crate::error::{invalid_invocation_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassengerContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Pending => "pending".into(),
            Self::Confirmed => "confirmed".into(),
            Self::Cancelled => "cancelled".into(),
            Self::Completed => "completed".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingRequest {
    pub estimate_token: Uuid,
    pub vehicle_class_id: String,
    pub contact: PassengerContact,
}

// The estimate is embedded verbatim at creation and never mutated afterwards;
// re-quoting a booking means attaching a freshly created estimate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub status: Status,
    pub contact: PassengerContact,
    pub trip: TripRequest,
    pub vehicle_class: VehicleClassPrice,
    pub estimate: PriceEstimate,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        contact: PassengerContact,
        estimate: PriceEstimate,
        vehicle_class: VehicleClassPrice,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: Status::Pending,
            contact,
            trip: estimate.trip.clone(),
            vehicle_class,
            estimate,
            created_at: Utc::now(),
        }
    }

    pub fn confirm(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Pending => {
                self.status = Status::Confirmed;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    pub fn cancel(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Pending | Status::Confirmed => {
                self.status = Status::Cancelled;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    pub fn complete(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Confirmed => {
                self.status = Status::Completed;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }
}
