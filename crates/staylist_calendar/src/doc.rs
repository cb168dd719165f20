// --- File: crates/staylist_calendar/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::blocklist::Actor;
use crate::grid::{GridRow, MonthGrid};
use crate::handlers::{BlockRequest, ReloadResponse, UnblockRequest};
use crate::reconciler::{MutationPhase, ReconcileOutcome, ReconcileReport};
use crate::status::CellStatus;
use staylist_common::{DataSource, ListingId};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_calendar_handler,
        crate::handlers::unblock_handler,
        crate::handlers::block_handler,
        crate::handlers::reload_handler
    ),
    components(
        schemas(
            Actor,
            BlockRequest,
            CellStatus,
            DataSource,
            GridRow,
            ListingId,
            MonthGrid,
            MutationPhase,
            ReconcileOutcome,
            ReconcileReport,
            ReloadResponse,
            UnblockRequest
        )
    ),
    tags(
        (name = "Calendar", description = "Listing availability calendar API")
    ),
    servers(
        (url = "/api", description = "Staylist API server")
    )
)]
pub struct CalendarApiDoc;
