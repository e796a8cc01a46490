use async_trait::async_trait;
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::{invalid_input_error, route_unavailable_error, Error};

// Quotes sit on the critical path of the booking flow, so the provider call
// is bounded; a slow provider degrades to the fallback route upstream.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Debug)]
pub struct RouteSummary {
    pub distance_meters: i64,
    pub duration_seconds: i64,
    pub encoded_path: Option<String>,
}

#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn route(
        &self,
        origin_place_id: &str,
        destination_place_id: &str,
    ) -> Result<RouteSummary, Error>;
}

// Directions client. Built once and injected into the engine; initialization
// state lives here, not in ambient globals.
pub struct GoogleMapsRouting {
    client: reqwest::Client,
    api_base: String,
    key: String,
}

impl GoogleMapsRouting {
    pub fn from_env() -> Result<Self, Error> {
        let api_base = env::var("GOOGLE_MAPS_API_BASE")
            .unwrap_or_else(|_| "maps.googleapis.com".into());
        let key = env::var("GOOGLE_MAPS_API_KEY")?;

        let client = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base,
            key,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Deserialize)]
struct DirectionsRoute {
    legs: Vec<DirectionsLeg>,
    overview_polyline: Option<OverviewPolyline>,
}

#[derive(Clone, Debug, Deserialize)]
struct DirectionsLeg {
    distance: TextValue,
    duration: TextValue,
}

#[derive(Clone, Debug, Deserialize)]
struct TextValue {
    value: i64,
}

#[derive(Clone, Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[async_trait]
impl RouteProvider for GoogleMapsRouting {
    #[tracing::instrument(skip(self))]
    async fn route(
        &self,
        origin_place_id: &str,
        destination_place_id: &str,
    ) -> Result<RouteSummary, Error> {
        let url = format!("https://{}/maps/api/directions/json", self.api_base);

        let res = self
            .client
            .get(url)
            .query(&[("key", self.key.as_str())])
            .query(&[("origin", format!("place_id:{}", origin_place_id))])
            .query(&[("destination", format!("place_id:{}", destination_place_id))])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(route_unavailable_error());
        }

        let data: DirectionsResponse = res.json().await?;

        if data.status != "OK" {
            return Err(route_unavailable_error());
        }

        let route = data
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| route_unavailable_error())?;

        if route.legs.is_empty() {
            return Err(route_unavailable_error());
        }

        Ok(RouteSummary {
            distance_meters: route.legs.iter().map(|leg| leg.distance.value).sum(),
            duration_seconds: route.legs.iter().map(|leg| leg.duration.value).sum(),
            encoded_path: route.overview_polyline.map(|polyline| polyline.points),
        })
    }
}
