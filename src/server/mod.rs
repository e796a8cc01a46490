mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::server::handlers::{bookings, estimates};

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/estimates", post(estimates::create))
        .route("/estimates/:token", get(estimates::find))
        .route("/bookings", post(bookings::create))
        .route("/bookings/:id", get(bookings::find))
        .route("/bookings/:id/confirm", patch(bookings::confirm))
        .route("/bookings/:id/cancel", patch(bookings::cancel))
        .route("/bookings/:id/complete", patch(bookings::complete))
        .layer(Extension(api));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
