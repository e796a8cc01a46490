use axum::extract::{Extension, Json, Path};
use axum_macros::debug_handler;
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{EstimateRecord, TripRequest};
use crate::error::Error;

#[debug_handler]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(trip): Json<TripRequest>,
) -> Result<Json<EstimateRecord>, Error> {
    let record = api.create_estimate(trip).await?;

    Ok(record.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
) -> Result<Json<EstimateRecord>, Error> {
    let record = api.find_estimate(token).await?;

    Ok(record.into())
}
