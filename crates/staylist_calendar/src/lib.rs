// --- File: crates/staylist_calendar/src/lib.rs ---
//! Availability calendar engine for Staylist listings.
//!
//! Rows are listings, columns are the days of a month. Each listing carries two
//! independent blocklists (admin and host). The [`selection`] controller turns
//! pointer gestures over the grid into block/unblock commits and the
//! [`reconciler`] applies them to the remote listing store.

// Declare modules within this crate
pub mod blocklist;
#[cfg(test)]
mod blocklist_proptest;
pub mod board;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod engine;
pub mod error;
pub mod grid;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod reconciler;
pub mod routes;
pub mod selection;
#[cfg(test)]
mod selection_test;
pub mod status;
#[cfg(test)]
mod store_mock;

pub use blocklist::{Actor, DateBlockSet, DateSet};
pub use board::{CalendarBoard, SharedBoard};
pub use engine::{ActorPrompt, AvailabilityCalendar, CommitOutcome, ReconcileTask};
pub use error::CalendarError;
pub use grid::{CellKey, MonthGrid};
pub use reconciler::{
    AvailabilityReconciler, MutationPhase, Notice, NoticeLevel, Notifier, ReconcileOutcome,
    ReconcileReport, TracingNotifier,
};
pub use routes::routes;
pub use selection::{
    DragPhase, DragSelectionController, PendingBlockRequest, PointerPosition, SelectionCommit,
    SelectionSurface,
};
pub use status::{CellStatus, SelectionAction};
