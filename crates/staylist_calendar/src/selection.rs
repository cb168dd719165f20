// --- File: crates/staylist_calendar/src/selection.rs ---
//! Drag selection over the calendar grid.
//!
//! The controller consumes abstract pointer events and never looks at rendered
//! markup: every event carries the (listing, date) key of the cell it hit and the
//! status that cell resolved to. States go `Idle -> Armed -> Dragging -> Idle`.

use serde::{Deserialize, Serialize};
use staylist_common::ListingId;
use tracing::debug;

use crate::error::CalendarError;
use crate::grid::CellKey;
use crate::status::{CellStatus, SelectionAction};

/// Pointer travel, in pixels, before a press turns into a drag.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &PointerPosition) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Receives selection highlight changes. Both callbacks default to no-ops.
pub trait SelectionSurface {
    fn mark_selected(&mut self, _cell: &CellKey) {}
    fn unmark_selected(&mut self, _cell: &CellKey) {}
}

impl SelectionSurface for () {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Armed,
    Dragging,
}

/// A block that waits for the actor choice before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PendingBlockRequest {
    pub listing_id: ListingId,
    pub dates: Vec<String>,
}

/// What a finished gesture asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCommit {
    /// Unblock right away, no confirmation.
    Unblock {
        listing_id: ListingId,
        dates: Vec<String>,
    },
    /// Block once an actor has been chosen.
    Block(PendingBlockRequest),
}

impl SelectionCommit {
    pub fn listing_id(&self) -> ListingId {
        match self {
            SelectionCommit::Unblock { listing_id, .. } => *listing_id,
            SelectionCommit::Block(request) => request.listing_id,
        }
    }

    pub fn dates(&self) -> &[String] {
        match self {
            SelectionCommit::Unblock { dates, .. } => dates,
            SelectionCommit::Block(request) => &request.dates,
        }
    }
}

#[derive(Debug, Clone)]
struct DragSelection {
    anchor_row: ListingId,
    anchor_position: PointerPosition,
    action: SelectionAction,
    /// In the order the cells were entered.
    dates: Vec<String>,
    started_as_drag: bool,
}

impl DragSelection {
    fn into_commit(self) -> Result<SelectionCommit, CalendarError> {
        if self.dates.is_empty() {
            return Err(CalendarError::NoOpSelection);
        }
        Ok(match self.action {
            SelectionAction::Remove => SelectionCommit::Unblock {
                listing_id: self.anchor_row,
                dates: self.dates,
            },
            SelectionAction::Add => SelectionCommit::Block(PendingBlockRequest {
                listing_id: self.anchor_row,
                dates: self.dates,
            }),
        })
    }
}

/// Tracks one pointer gesture at a time and turns it into a [`SelectionCommit`].
pub struct DragSelectionController<S: SelectionSurface = ()> {
    threshold_px: f64,
    selection: Option<DragSelection>,
    marked: Vec<CellKey>,
    surface: S,
}

impl Default for DragSelectionController<()> {
    fn default() -> Self {
        Self::with_surface(())
    }
}

impl DragSelectionController<()> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SelectionSurface> DragSelectionController<S> {
    pub fn with_surface(surface: S) -> Self {
        Self {
            threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            selection: None,
            marked: Vec::new(),
            surface,
        }
    }

    /// Overrides the drag threshold. Negative values are treated as zero.
    pub fn threshold(mut self, threshold_px: f64) -> Self {
        self.threshold_px = threshold_px.max(0.0);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn phase(&self) -> DragPhase {
        match &self.selection {
            None => DragPhase::Idle,
            Some(selection) if selection.started_as_drag => DragPhase::Dragging,
            Some(_) => DragPhase::Armed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_some()
    }

    /// Dates collected so far, empty when idle.
    pub fn selected_dates(&self) -> &[String] {
        self.selection
            .as_ref()
            .map(|selection| selection.dates.as_slice())
            .unwrap_or_default()
    }

    /// Starts a gesture on `cell`. Returns `false` when the press was ignored:
    /// another gesture is already running, or the cell carries no date.
    pub fn pointer_down(
        &mut self,
        cell: CellKey,
        status: CellStatus,
        position: PointerPosition,
    ) -> bool {
        if self.selection.is_some() || cell.date.is_empty() {
            return false;
        }
        debug!(
            "selection armed on listing {} at {} ({:?})",
            cell.listing_id,
            cell.date,
            status.action()
        );
        self.selection = Some(DragSelection {
            anchor_row: cell.listing_id,
            anchor_position: position,
            action: status.action(),
            dates: vec![cell.date.clone()],
            started_as_drag: false,
        });
        self.mark(cell);
        true
    }

    /// Pointer moved with the button held. Promotes an armed press to a drag
    /// once it travelled past the threshold.
    pub fn pointer_move(&mut self, position: PointerPosition) -> DragPhase {
        let threshold = self.threshold_px;
        if let Some(selection) = self.selection.as_mut() {
            if !selection.started_as_drag
                && selection.anchor_position.distance_to(&position) > threshold
            {
                selection.started_as_drag = true;
            }
        }
        self.phase()
    }

    /// Pointer entered `cell`. A release reported here finalizes the gesture.
    pub fn pointer_over(
        &mut self,
        cell: CellKey,
        status: CellStatus,
        position: PointerPosition,
        button_down: bool,
    ) -> Result<Option<SelectionCommit>, CalendarError> {
        if !button_down {
            return self.pointer_up();
        }
        if self.pointer_move(position) != DragPhase::Dragging {
            return Ok(None);
        }
        let accepted = match self.selection.as_mut() {
            Some(selection)
                if selection.anchor_row == cell.listing_id
                    && selection.action == status.action()
                    && !cell.date.is_empty()
                    && !selection.dates.contains(&cell.date) =>
            {
                selection.dates.push(cell.date.clone());
                true
            }
            _ => false,
        };
        if accepted {
            self.mark(cell);
        }
        Ok(None)
    }

    /// Ends the gesture. Marks are cleared whatever the outcome.
    ///
    /// Returns `Ok(None)` when no gesture was running.
    pub fn pointer_up(&mut self) -> Result<Option<SelectionCommit>, CalendarError> {
        let Some(selection) = self.selection.take() else {
            return Ok(None);
        };
        self.clear_marks();
        let commit = selection.into_commit()?;
        debug!(
            "selection on listing {} finished with {} date(s)",
            commit.listing_id(),
            commit.dates().len()
        );
        Ok(Some(commit))
    }

    /// Drops the running gesture without committing anything.
    pub fn cancel(&mut self) {
        self.selection = None;
        self.clear_marks();
    }

    fn mark(&mut self, cell: CellKey) {
        self.surface.mark_selected(&cell);
        self.marked.push(cell);
    }

    fn clear_marks(&mut self) {
        for cell in self.marked.drain(..) {
            self.surface.unmark_selected(&cell);
        }
    }
}
