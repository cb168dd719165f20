// --- File: crates/services/staylist_backend/src/app.rs ---
//! Builds the shared calendar state and the HTTP router.
use axum::{routing::get, Router};
use staylist_calendar::handlers::CalendarState;
use staylist_calendar::{AvailabilityReconciler, CalendarBoard, SharedBoard, TracingNotifier};
use staylist_common::{ListingFilter, StaylistError};
use staylist_config::AppConfig;
use staylist_wp::WordPressClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Listing filter applied to the board on startup and on every full reload.
pub fn initial_filter(config: &AppConfig) -> ListingFilter {
    ListingFilter {
        status: config.calendar.default_status_filter.clone(),
        search: None,
    }
}

/// Wires the WordPress store, an empty board and the reconciler together.
///
/// Nothing is fetched here; the board is filled by the first reload.
pub fn build_state(config: Arc<AppConfig>) -> Result<Arc<CalendarState>, StaylistError> {
    let store = WordPressClient::new(config.wordpress.clone())
        .map_err(|err| StaylistError::ConfigError(err.to_string()))?;
    let board = SharedBoard::new(CalendarBoard::new(initial_filter(&config)));
    let reconciler =
        AvailabilityReconciler::new(Arc::new(store), board, Arc::new(TracingNotifier));
    Ok(Arc::new(CalendarState { config, reconciler }))
}

pub fn build_router(state: Arc<CalendarState>) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Staylist API!" }))
        .merge(staylist_calendar::routes(state));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use staylist_calendar::doc::CalendarApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Staylist API",
                version = "0.1.0",
                description = "Listing availability administration",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CalendarApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    app.layer(TraceLayer::new_for_http())
}
