mod app;
mod handlers;
mod models;
mod state;

use authrelay_common::{bind_listener, env_or, init_tracing, shutdown_signal};

use crate::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let port = env_or("PORT", 8080u16);
    let state = AppState::from_env();

    let app = app::build_router(state);
    let listener = bind_listener(port).await;
    tracing::info!(port, "backend service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("serve");
}
