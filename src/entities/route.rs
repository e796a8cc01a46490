use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Used when the routing provider fails or times out: a quote must still be
// produced, so degraded trips are priced on a fixed long-transfer route and
// flagged as estimated.
pub const FALLBACK_DISTANCE_METERS: i64 = 30_000;
pub const FALLBACK_DURATION_SECONDS: i64 = 2_700;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteInfo {
    pub distance_meters: i64,
    pub duration_seconds: i64,
    pub encoded_path: Option<String>,
    pub is_estimated: bool,
}

impl RouteInfo {
    pub fn confirmed(
        distance_meters: i64,
        duration_seconds: i64,
        encoded_path: Option<String>,
    ) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            encoded_path,
            is_estimated: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            distance_meters: FALLBACK_DISTANCE_METERS,
            duration_seconds: FALLBACK_DURATION_SECONDS,
            encoded_path: None,
            is_estimated: true,
        }
    }

    pub fn distance_km(&self) -> Decimal {
        Decimal::from(self.distance_meters) / Decimal::from(1000)
    }
}
