use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{BookingAPI, EstimateAPI},
    entities::{Booking, BookingRequest},
    error::{invalid_input_error, validation_error, Error},
};

impl Engine {
    async fn fetch_booking(&self, id: &Uuid) -> Result<Booking, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM bookings WHERE id = $1").bind(id))
            .await?;

        let result = maybe_result.ok_or_else(|| invalid_input_error())?;
        let Json(booking) = result.try_get("data")?;

        Ok(booking)
    }

    async fn update_booking(&self, booking: &Booking) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("UPDATE bookings SET status = $2, data = $3 WHERE id = $1")
                .bind(&booking.id)
                .bind(booking.status.name())
                .bind(Json(booking)),
        )
        .await?;

        Ok(())
    }
}

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error> {
        let record = self.find_estimate(request.estimate_token).await?;

        let class = record
            .estimate
            .class(&request.vehicle_class_id)
            .ok_or_else(|| validation_error("vehicle class is not offered on this estimate"))?
            .clone();

        let booking = Booking::new(request.contact, record.estimate, class);

        let mut conn = self.pool.acquire().await?;
        conn.execute(
            sqlx::query("INSERT INTO bookings (id, status, data) VALUES ($1, $2, $3)")
                .bind(&booking.id)
                .bind(booking.status.name())
                .bind(Json(&booking)),
        )
        .await?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error> {
        self.fetch_booking(&id).await
    }

    #[tracing::instrument(skip(self))]
    async fn confirm_booking(&self, id: Uuid) -> Result<Booking, Error> {
        let mut booking = self.fetch_booking(&id).await?;

        booking.confirm()?;
        self.update_booking(&booking).await?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_booking(&self, id: Uuid) -> Result<Booking, Error> {
        let mut booking = self.fetch_booking(&id).await?;

        booking.cancel()?;
        self.update_booking(&booking).await?;

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn complete_booking(&self, id: Uuid) -> Result<Booking, Error> {
        let mut booking = self.fetch_booking(&id).await?;

        booking.complete()?;
        self.update_booking(&booking).await?;

        Ok(booking)
    }
}
