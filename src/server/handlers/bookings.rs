use axum::extract::{Extension, Json, Path};
use axum_macros::debug_handler;
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{Booking, BookingRequest};
use crate::error::Error;

#[debug_handler]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Booking>, Error> {
    let booking = api.create_booking(request).await?;

    Ok(booking.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.find_booking(id).await?;

    Ok(booking.into())
}

pub async fn confirm(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.confirm_booking(id).await?;

    Ok(booking.into())
}

pub async fn cancel(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.cancel_booking(id).await?;

    Ok(booking.into())
}

pub async fn complete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.complete_booking(id).await?;

    Ok(booking.into())
}
