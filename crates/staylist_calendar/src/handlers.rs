// --- File: crates/staylist_calendar/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use staylist_common::{DataSource, ListingId, StaylistError};
use staylist_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::blocklist::Actor;
use crate::grid::MonthGrid;
use crate::reconciler::{AvailabilityReconciler, ReconcileReport};

// Shared state of the calendar routes
#[derive(Clone)]
pub struct CalendarState {
    pub config: Arc<AppConfig>,
    pub reconciler: AvailabilityReconciler,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct MonthQuery {
    /// Four-digit year, e.g. 2024
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
}

#[derive(Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnblockRequest {
    pub listing_id: ListingId,
    pub dates: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BlockRequest {
    pub listing_id: ListingId,
    pub dates: Vec<String>,
    pub actor: Actor,
}

#[derive(Debug, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReloadResponse {
    pub listings: usize,
    pub source: DataSource,
}

fn report_response(report: ReconcileReport) -> (StatusCode, Json<ReconcileReport>) {
    let status =
        StatusCode::from_u16(report.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(report))
}

/// Month grid of every loaded listing.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calendar",
    params(MonthQuery),
    responses(
        (status = 200, description = "Cell statuses per listing and day", body = MonthGrid),
        (status = 400, description = "Invalid year or month")
    ),
    tag = "Calendar"
))]
pub async fn get_calendar_handler(
    State(state): State<Arc<CalendarState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthGrid>, StaylistError> {
    let grid = state
        .reconciler
        .board()
        .read()
        .month_grid(query.year, query.month)?;
    Ok(Json(grid))
}

/// Removes days from both blocklists of a listing.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calendar/unblock",
    request_body = UnblockRequest,
    responses(
        (status = 200, description = "Unblock confirmed", body = ReconcileReport),
        (status = 400, description = "Empty selection or malformed date"),
        (status = 403, description = "The store refused the write", body = ReconcileReport),
        (status = 404, description = "Listing not loaded"),
        (status = 502, description = "The store could not be reached", body = ReconcileReport)
    ),
    tag = "Calendar"
))]
pub async fn unblock_handler(
    State(state): State<Arc<CalendarState>>,
    Json(request): Json<UnblockRequest>,
) -> Result<(StatusCode, Json<ReconcileReport>), StaylistError> {
    info!(
        "unblock request for listing {}: {:?}",
        request.listing_id, request.dates
    );
    let report = state
        .reconciler
        .unblock(request.listing_id, request.dates)
        .await?;
    Ok(report_response(report))
}

/// Adds days to the admin or host blocklist of a listing.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calendar/block",
    request_body = BlockRequest,
    responses(
        (status = 200, description = "Block confirmed by reload", body = ReconcileReport),
        (status = 202, description = "Block saved but not verified", body = ReconcileReport),
        (status = 400, description = "Empty selection or malformed date"),
        (status = 403, description = "The store refused the write", body = ReconcileReport),
        (status = 404, description = "Listing not loaded"),
        (status = 502, description = "The store could not be reached", body = ReconcileReport)
    ),
    tag = "Calendar"
))]
pub async fn block_handler(
    State(state): State<Arc<CalendarState>>,
    Json(request): Json<BlockRequest>,
) -> Result<(StatusCode, Json<ReconcileReport>), StaylistError> {
    info!(
        "block request for listing {} as {}: {:?}",
        request.listing_id, request.actor, request.dates
    );
    let report = state
        .reconciler
        .block(request.listing_id, request.dates, request.actor)
        .await?;
    Ok(report_response(report))
}

/// Reloads every listing from the store.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calendar/reload",
    responses(
        (status = 200, description = "Board reloaded", body = ReloadResponse),
        (status = 502, description = "The store could not be reached")
    ),
    tag = "Calendar"
))]
pub async fn reload_handler(
    State(state): State<Arc<CalendarState>>,
) -> Result<Json<ReloadResponse>, StaylistError> {
    let filter = state.reconciler.board().read().filter().clone();
    let source = state.reconciler.reload_all(filter).await?;
    let listings = state.reconciler.board().read().len();
    Ok(Json(ReloadResponse { listings, source }))
}
