mod booking_api;
mod estimate_api;

use std::sync::Arc;

use sqlx::{Executor, Pool, Postgres};

use crate::{
    api::API, config::TariffSchedule, error::Error, external::routing::RouteProvider,
};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    schedule: TariffSchedule,
    router: Arc<dyn RouteProvider + Send + Sync>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(
        pool: Pool<Database>,
        schedule: TariffSchedule,
        router: Arc<dyn RouteProvider + Send + Sync>,
    ) -> Result<Self, Error> {
        schedule.validate()?;

        // estimate store (KV)
        pool.execute(
            "CREATE TABLE IF NOT EXISTS estimates (token UUID PRIMARY KEY, data JSONB NOT NULL)",
        )
        .await?;

        // booking store (KV, status column for list filtering)
        pool.execute(
            "CREATE TABLE IF NOT EXISTS bookings (id UUID PRIMARY KEY, status VARCHAR NOT NULL, data JSONB NOT NULL)",
        )
        .await?;

        Ok(Self {
            pool,
            schedule,
            router,
        })
    }
}

impl API for Engine {}
