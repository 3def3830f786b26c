mod app;
mod handlers;
mod models;
mod state;

use authrelay_common::{bind_listener, init_tracing, shutdown_signal};

use crate::state::{AppState, GatewayConfig};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GatewayConfig::from_env();
    tracing::info!(
        port = config.port,
        backend = %config.backend_base_url,
        "gateway service starting"
    );

    let listener = bind_listener(config.port).await;
    let state = AppState::new(config.backend_base_url);
    let app = app::build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("serve");
}
