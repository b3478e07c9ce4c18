//! Rutas HTTP
//!
//! `create_app` monta todos los routers sobre el estado compartido y
//! aplica las capas de CORS y trazas.

pub mod health_routes;
pub mod parking_spot_routes;
pub mod reservation_routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .merge(health_routes::create_health_router())
        .merge(parking_spot_routes::create_parking_spot_router())
        .merge(reservation_routes::create_reservation_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
