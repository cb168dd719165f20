// --- File: crates/staylist_calendar/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    block_handler, get_calendar_handler, reload_handler, unblock_handler, CalendarState,
};

/// Creates a router containing all routes of the availability calendar.
pub fn routes(state: Arc<CalendarState>) -> Router {
    Router::new()
        .route("/calendar", get(get_calendar_handler))
        .route("/calendar/unblock", post(unblock_handler))
        .route("/calendar/block", post(block_handler))
        .route("/calendar/reload", post(reload_handler))
        .with_state(state)
}
