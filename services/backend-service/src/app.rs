use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{healthz, login, ping, readyz};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Browsers hit this service directly in the demo setup, so CORS stays open.
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/ping", get(ping))
        .route("/login", post(login))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
