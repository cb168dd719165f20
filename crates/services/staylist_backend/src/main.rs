// File: services/staylist_backend/src/main.rs
mod app;

use staylist_common::{log_result, Context, StaylistError};
use staylist_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), StaylistError> {
    staylist_common::init();
    let config = Arc::new(load_config().context("Failed to load config")?);

    let state = app::build_state(config.clone())?;

    // A store that is down at startup must not keep the server from coming up;
    // the board stays empty until the next reload.
    let filter = app::initial_filter(&config);
    let _ = log_result(
        state
            .reconciler
            .reload_all(filter)
            .await
            .map_err(StaylistError::from),
        "Initial listing load complete",
        "Initial listing load failed",
    );

    let app = app::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
