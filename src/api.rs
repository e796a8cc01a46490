use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Booking, BookingRequest, EstimateRecord, TripRequest};
use crate::error::Error;

#[async_trait]
pub trait EstimateAPI {
    async fn create_estimate(&self, trip: TripRequest) -> Result<EstimateRecord, Error>;
    async fn find_estimate(&self, token: Uuid) -> Result<EstimateRecord, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error>;
    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error>;
    async fn confirm_booking(&self, id: Uuid) -> Result<Booking, Error>;
    async fn cancel_booking(&self, id: Uuid) -> Result<Booking, Error>;
    async fn complete_booking(&self, id: Uuid) -> Result<Booking, Error>;
}

pub trait API: EstimateAPI + BookingAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
