use super::Engine;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::EstimateAPI,
    entities::{EstimateRecord, RouteInfo, TripRequest},
    error::{invalid_input_error, Error},
    external::routing::RouteProvider,
    pricing,
};

// Provider failure is recoverable: the quote is produced on the fallback
// route and flagged as estimated, never rejected.
pub(super) async fn resolve_route(router: &dyn RouteProvider, trip: &TripRequest) -> RouteInfo {
    match router
        .route(&trip.origin_place_id, &trip.destination_place_id)
        .await
    {
        Ok(summary) => RouteInfo::confirmed(
            summary.distance_meters,
            summary.duration_seconds,
            summary.encoded_path,
        ),
        Err(err) => {
            tracing::warn!("route lookup failed ({}), quoting on fallback route", err.message);
            RouteInfo::fallback()
        }
    }
}

#[async_trait]
impl EstimateAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_estimate(&self, trip: TripRequest) -> Result<EstimateRecord, Error> {
        trip.validate(self.schedule.local_now())?;

        let route = resolve_route(self.router.as_ref(), &trip).await;

        let estimate = pricing::build_estimate(&trip, route, &self.schedule, Utc::now())
            .map_err(|err| {
                if err.is_internal() {
                    tracing::error!("tariff schedule rejected a valid request: {}", err.message);
                }
                err
            })?;

        let record = EstimateRecord::new(estimate);

        let mut conn = self.pool.acquire().await?;
        conn.execute(
            sqlx::query("INSERT INTO estimates (token, data) VALUES ($1, $2)")
                .bind(&record.token)
                .bind(Json(&record)),
        )
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn find_estimate(&self, token: Uuid) -> Result<EstimateRecord, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM estimates WHERE token = $1").bind(&token))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(record) = result.try_get("data")?;

        Ok(record)
    }
}
