// --- File: crates/staylist_calendar/src/board.rs ---
//! Local view of every listing shown in the calendar.
//!
//! The board is what cells are resolved against. It is replaced wholesale on a
//! full reload and per listing after a confirmed write.

use staylist_common::{DataSource, ListingFilter, ListingId, ListingPage, ListingRecord};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::blocklist::DateBlockSet;
use crate::error::CalendarError;
use crate::grid::{month_days, GridRow, MonthGrid};
use crate::status::CellStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub listing_id: ListingId,
    pub title: String,
    pub status: String,
    pub blocks: DateBlockSet,
}

impl From<&ListingRecord> for ListingRow {
    fn from(record: &ListingRecord) -> Self {
        Self {
            listing_id: record.id,
            title: record.title.clone(),
            status: record.status.clone(),
            blocks: DateBlockSet::from_record(record),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalendarBoard {
    rows: BTreeMap<ListingId, ListingRow>,
    source: Option<DataSource>,
    filter: ListingFilter,
    /// Bumped by every full reload.
    generation: u64,
}

impl CalendarBoard {
    pub fn new(filter: ListingFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn from_page(page: &ListingPage, filter: ListingFilter) -> Self {
        let mut board = Self::new(filter);
        board.replace_all(page);
        board
    }

    /// Swaps in a freshly loaded listing set. Rows not in `page` disappear.
    pub fn replace_all(&mut self, page: &ListingPage) {
        self.rows = page
            .listings
            .iter()
            .map(|record| (record.id, ListingRow::from(record)))
            .collect();
        self.source = Some(page.source);
        self.generation += 1;
    }

    /// Number of full reloads applied so far. A change between two reads means
    /// every row may have been replaced in between.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces (or inserts) the row of one listing with its authoritative record.
    pub fn replace_listing(&mut self, record: &ListingRecord) {
        self.rows.insert(record.id, ListingRow::from(record));
    }

    pub fn contains(&self, listing_id: ListingId) -> bool {
        self.rows.contains_key(&listing_id)
    }

    pub fn blocks(&self, listing_id: ListingId) -> Option<&DateBlockSet> {
        self.rows.get(&listing_id).map(|row| &row.blocks)
    }

    pub fn blocks_mut(&mut self, listing_id: ListingId) -> Option<&mut DateBlockSet> {
        self.rows.get_mut(&listing_id).map(|row| &mut row.blocks)
    }

    pub fn status_of(&self, listing_id: ListingId, date: &str) -> Option<CellStatus> {
        self.blocks(listing_id).map(|blocks| blocks.status(date))
    }

    pub fn month_grid(&self, year: i32, month: u32) -> Result<MonthGrid, CalendarError> {
        let days = month_days(year, month)?;
        let rows = self
            .rows
            .values()
            .map(|row| GridRow {
                listing_id: row.listing_id,
                title: row.title.clone(),
                cells: days.iter().map(|day| row.blocks.status(day)).collect(),
            })
            .collect();
        Ok(MonthGrid {
            year,
            month,
            days,
            rows,
            source: self.source,
        })
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ListingFilter) {
        self.filter = filter;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Board shared between the reconciler, the engine and the HTTP handlers.
///
/// Guards are never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedBoard(Arc<RwLock<CalendarBoard>>);

impl SharedBoard {
    pub fn new(board: CalendarBoard) -> Self {
        Self(Arc::new(RwLock::new(board)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, CalendarBoard> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, CalendarBoard> {
        self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
