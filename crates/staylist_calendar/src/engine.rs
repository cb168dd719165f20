// --- File: crates/staylist_calendar/src/engine.rs ---
//! Wires the drag controller to the reconciler.
//!
//! [`AvailabilityCalendar`] is what a rendering surface talks to: it resolves
//! the status of the cell under the pointer from the shared board, feeds the
//! controller, and routes finished gestures. Unblocks come back as a
//! [`ReconcileTask`] right away; blocks are parked as a [`PendingBlockRequest`]
//! until an actor is chosen.
//!
//! Pointer handlers never wait on the store. A task owns its own handle to the
//! reconciler, so the caller can await or spawn it while the next gesture is
//! already being tracked.

use staylist_common::{BoxFuture, DataSource, ListingFilter, ListingId};
use staylist_config::CalendarConfig;
use std::fmt;
use std::future::IntoFuture;
use tracing::debug;

use crate::blocklist::Actor;
use crate::board::SharedBoard;
use crate::error::CalendarError;
use crate::grid::{parse_day, CellKey, MonthGrid};
use crate::reconciler::{AvailabilityReconciler, ReconcileReport};
use crate::selection::{
    DragPhase, DragSelectionController, PendingBlockRequest, PointerPosition, SelectionCommit,
    SelectionSurface,
};
use crate::status::CellStatus;

/// Asks the user who a block is for.
#[cfg_attr(test, mockall::automock)]
pub trait ActorPrompt: Send + Sync {
    /// `None` means the prompt was dismissed.
    fn choose_actor(&self, request: &PendingBlockRequest) -> Option<Actor>;
}

/// A committed mutation that has not touched the store yet.
///
/// Nothing happens until it is awaited (or spawned).
pub struct ReconcileTask {
    listing_id: ListingId,
    actor: Option<Actor>,
    dates: Vec<String>,
    future: BoxFuture<'static, ReconcileReport, CalendarError>,
}

impl ReconcileTask {
    fn unblock(
        reconciler: AvailabilityReconciler,
        listing_id: ListingId,
        dates: Vec<String>,
    ) -> Self {
        let task_dates = dates.clone();
        Self {
            listing_id,
            actor: None,
            dates,
            future: Box::pin(async move { reconciler.unblock(listing_id, task_dates).await }),
        }
    }

    fn block(
        reconciler: AvailabilityReconciler,
        request: PendingBlockRequest,
        actor: Actor,
    ) -> Self {
        let PendingBlockRequest { listing_id, dates } = request;
        let task_dates = dates.clone();
        Self {
            listing_id,
            actor: Some(actor),
            dates,
            future: Box::pin(async move { reconciler.block(listing_id, task_dates, actor).await }),
        }
    }

    pub fn listing_id(&self) -> ListingId {
        self.listing_id
    }

    /// `None` for an unblock.
    pub fn actor(&self) -> Option<Actor> {
        self.actor
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }
}

impl fmt::Debug for ReconcileTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconcileTask")
            .field("listing_id", &self.listing_id)
            .field("actor", &self.actor)
            .field("dates", &self.dates)
            .finish_non_exhaustive()
    }
}

impl IntoFuture for ReconcileTask {
    type Output = Result<ReconcileReport, CalendarError>;
    type IntoFuture = BoxFuture<'static, ReconcileReport, CalendarError>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

/// Result of handing a pointer event to the calendar.
#[derive(Debug)]
pub enum CommitOutcome {
    /// Nothing was committed by this event.
    Nothing,
    /// The gesture resolved to zero dates.
    NoOp,
    /// An unblock is ready to run.
    Unblocking(ReconcileTask),
    AwaitingActor(PendingBlockRequest),
    /// A block with a chosen actor is ready to run.
    Blocking(ReconcileTask),
    /// The actor prompt was dismissed; nothing was written.
    Cancelled,
    /// Refused before any store call.
    Rejected(CalendarError),
}

pub struct AvailabilityCalendar<U: SelectionSurface = ()> {
    reconciler: AvailabilityReconciler,
    controller: DragSelectionController<U>,
    pending: Option<PendingBlockRequest>,
}

impl AvailabilityCalendar<()> {
    pub fn new(reconciler: AvailabilityReconciler, config: &CalendarConfig) -> Self {
        Self::with_surface(reconciler, config, ())
    }
}

impl<U: SelectionSurface> AvailabilityCalendar<U> {
    pub fn with_surface(
        reconciler: AvailabilityReconciler,
        config: &CalendarConfig,
        surface: U,
    ) -> Self {
        Self {
            reconciler,
            controller: DragSelectionController::with_surface(surface)
                .threshold(config.drag_threshold_px),
            pending: None,
        }
    }

    pub fn board(&self) -> &SharedBoard {
        self.reconciler.board()
    }

    pub fn pending(&self) -> Option<&PendingBlockRequest> {
        self.pending.as_ref()
    }

    pub async fn load(&self, filter: ListingFilter) -> Result<DataSource, CalendarError> {
        self.reconciler.reload_all(filter).await
    }

    pub fn month_grid(&self, year: i32, month: u32) -> Result<MonthGrid, CalendarError> {
        self.board().read().month_grid(year, month)
    }

    fn cell(&self, listing_id: ListingId, date: &str) -> Option<(CellKey, CellStatus)> {
        parse_day(date).ok()?;
        let status = self.board().read().status_of(listing_id, date)?;
        Some((CellKey::new(listing_id, date), status))
    }

    /// Press on a cell. Ignored off the grid, during a gesture, or while a block
    /// is waiting for its actor.
    pub fn on_cell_pointer_down(
        &mut self,
        listing_id: ListingId,
        date: &str,
        position: PointerPosition,
    ) -> bool {
        if self.pending.is_some() {
            debug!("pointer-down ignored, a block is waiting for its actor");
            return false;
        }
        match self.cell(listing_id, date) {
            Some((cell, status)) => self.controller.pointer_down(cell, status, position),
            None => false,
        }
    }

    pub fn on_cell_pointer_move(&mut self, position: PointerPosition) -> DragPhase {
        self.controller.pointer_move(position)
    }

    /// Pointer entered a cell. `button_down == false` counts as a release.
    pub fn on_cell_pointer_over(
        &mut self,
        listing_id: ListingId,
        date: &str,
        position: PointerPosition,
        button_down: bool,
    ) -> CommitOutcome {
        if !button_down {
            return self.on_pointer_up();
        }
        let Some((cell, status)) = self.cell(listing_id, date) else {
            self.controller.pointer_move(position);
            return CommitOutcome::Nothing;
        };
        let result = self.controller.pointer_over(cell, status, position, true);
        self.dispatch(result)
    }

    pub fn on_pointer_up(&mut self) -> CommitOutcome {
        let result = self.controller.pointer_up();
        self.dispatch(result)
    }

    fn dispatch(
        &mut self,
        result: Result<Option<SelectionCommit>, CalendarError>,
    ) -> CommitOutcome {
        match result {
            Ok(None) => CommitOutcome::Nothing,
            Ok(Some(SelectionCommit::Unblock { listing_id, dates })) => {
                match self.reconciler.preflight(listing_id, &dates) {
                    Ok(()) => CommitOutcome::Unblocking(ReconcileTask::unblock(
                        self.reconciler.clone(),
                        listing_id,
                        dates,
                    )),
                    Err(err) => CommitOutcome::Rejected(err),
                }
            }
            Ok(Some(SelectionCommit::Block(request))) => {
                self.pending = Some(request.clone());
                CommitOutcome::AwaitingActor(request)
            }
            Err(CalendarError::NoOpSelection) => {
                debug!("selection resolved to no dates");
                CommitOutcome::NoOp
            }
            Err(err) => CommitOutcome::Rejected(err),
        }
    }

    /// Completes the pending block with `actor`, or drops it on `None`.
    pub fn resolve_pending(&mut self, actor: Option<Actor>) -> CommitOutcome {
        let Some(request) = self.pending.take() else {
            return CommitOutcome::Nothing;
        };
        let Some(actor) = actor else {
            debug!("block of listing {} cancelled", request.listing_id);
            return CommitOutcome::Cancelled;
        };
        match self.reconciler.preflight(request.listing_id, &request.dates) {
            Ok(()) => CommitOutcome::Blocking(ReconcileTask::block(
                self.reconciler.clone(),
                request,
                actor,
            )),
            Err(err) => CommitOutcome::Rejected(err),
        }
    }

    /// Asks `prompt` for the actor of the pending block and completes it.
    pub fn prompt_pending(&mut self, prompt: &dyn ActorPrompt) -> CommitOutcome {
        let actor = match &self.pending {
            Some(request) => prompt.choose_actor(request),
            None => return CommitOutcome::Nothing,
        };
        self.resolve_pending(actor)
    }
}
