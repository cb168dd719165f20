// --- File: crates/staylist_calendar/src/reconciler.rs ---
//! Applies committed selections to the remote listing store.
//!
//! Each mutation walks `Applying -> Verifying -> Confirmed | Fallback`, or ends in
//! `Failed`. Store errors stop here: they become a [`Notice`] and a
//! [`ReconcileReport`], never a panic or an error in the drag controller.

use serde::{Deserialize, Serialize};
use staylist_common::{
    DataSource, HttpStatusCode, ListingFilter, ListingId, ListingStore, StaylistError,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info, warn};

use crate::blocklist::Actor;
use crate::board::SharedBoard;
use crate::error::CalendarError;
use crate::grid::validate_days;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible message about a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Notice {
    pub level: NoticeLevel,
    pub listing_id: Option<ListingId>,
    pub message: String,
}

/// Where user-visible notices go.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        let listing = notice
            .listing_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        match notice.level {
            NoticeLevel::Info => info!("[listing {}] {}", listing, notice.message),
            NoticeLevel::Warning => warn!("[listing {}] {}", listing, notice.message),
            NoticeLevel::Error => error!("[listing {}] {}", listing, notice.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MutationPhase {
    /// Local patch applied, store write in flight
    Applying,
    /// Store write accepted, authoritative reload in flight
    Verifying,
    /// Local state matches the store
    Confirmed,
    /// Store write accepted but the reload failed; the local patch stays
    Fallback,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOutcome {
    Confirmed,
    Unverified,
    Failed,
}

/// What happened to one mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReconcileReport {
    pub listing_id: ListingId,
    /// `None` for an unblock.
    pub actor: Option<Actor>,
    pub dates: Vec<String>,
    pub outcome: ReconcileOutcome,
    pub message: String,
    pub phases: Vec<MutationPhase>,
    /// Whether local state was replaced from an authoritative reload.
    pub resynced: bool,
    #[serde(skip)]
    pub error: Option<CalendarError>,
}

impl ReconcileReport {
    fn start(listing_id: ListingId, actor: Option<Actor>, dates: Vec<String>) -> Self {
        Self {
            listing_id,
            actor,
            dates,
            outcome: ReconcileOutcome::Confirmed,
            message: String::new(),
            phases: vec![MutationPhase::Applying],
            resynced: false,
            error: None,
        }
    }

    fn enter(&mut self, phase: MutationPhase) {
        self.phases.push(phase);
    }

    fn finish(&mut self, outcome: ReconcileOutcome, message: String) {
        self.outcome = outcome;
        self.message = message;
    }

    fn fail(&mut self, err: CalendarError) {
        self.enter(MutationPhase::Failed);
        self.finish(ReconcileOutcome::Failed, err.user_message());
        self.error = Some(err);
    }

    pub fn phase(&self) -> MutationPhase {
        self.phases
            .last()
            .copied()
            .unwrap_or(MutationPhase::Applying)
    }

    /// Status code for returning this report over HTTP.
    pub fn http_status(&self) -> u16 {
        match (&self.outcome, &self.error) {
            (ReconcileOutcome::Confirmed, _) => 200,
            (ReconcileOutcome::Unverified, _) => 202,
            (ReconcileOutcome::Failed, Some(err)) => StaylistError::from(err.clone()).status_code(),
            (ReconcileOutcome::Failed, None) => 500,
        }
    }

    fn notice(&self) -> Notice {
        let level = match self.outcome {
            ReconcileOutcome::Confirmed => NoticeLevel::Info,
            ReconcileOutcome::Unverified => NoticeLevel::Warning,
            ReconcileOutcome::Failed => NoticeLevel::Error,
        };
        Notice {
            level,
            listing_id: Some(self.listing_id),
            message: self.message.clone(),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "day"
    } else {
        "days"
    }
}

/// Writes block/unblock mutations to the store and keeps the shared board in step.
///
/// Mutations of the same listing run one after the other; different listings
/// do not wait on each other.
#[derive(Clone)]
pub struct AvailabilityReconciler {
    store: Arc<dyn ListingStore>,
    board: SharedBoard,
    notifier: Arc<dyn Notifier>,
    locks: Arc<Mutex<HashMap<ListingId, Arc<AsyncMutex<()>>>>>,
}

impl AvailabilityReconciler {
    pub fn new(
        store: Arc<dyn ListingStore>,
        board: SharedBoard,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            board,
            notifier,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    fn listing_lock(&self, listing_id: ListingId) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(listing_id).or_default().clone()
    }

    /// Drops the map entry of a listing once nobody else holds or waits on its lock.
    fn release_listing_lock(&self, listing_id: ListingId, lock: Arc<AsyncMutex<()>>) {
        drop(lock);
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if locks
            .get(&listing_id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(&listing_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Rejections that need no store call at all.
    pub fn preflight(&self, listing_id: ListingId, dates: &[String]) -> Result<(), CalendarError> {
        if dates.is_empty() {
            return Err(CalendarError::NoOpSelection);
        }
        validate_days(dates)?;
        if !self.board.read().contains(listing_id) {
            return Err(CalendarError::UnknownListing(listing_id));
        }
        Ok(())
    }

    /// Removes `dates` from both blocklists of a listing.
    ///
    /// The board is patched before the write. If the write fails the listing is
    /// reloaded from the store; if that fails too the patch is rolled back. If a
    /// full reload replaced the board while the write was in flight, the listing
    /// is reloaded after a successful write as well.
    pub async fn unblock(
        &self,
        listing_id: ListingId,
        dates: Vec<String>,
    ) -> Result<ReconcileReport, CalendarError> {
        self.preflight(listing_id, &dates)?;
        let lock = self.listing_lock(listing_id);
        let result = {
            let _guard = lock.lock().await;
            self.unblock_locked(listing_id, dates).await
        };
        self.release_listing_lock(listing_id, lock);
        result
    }

    async fn unblock_locked(
        &self,
        listing_id: ListingId,
        dates: Vec<String>,
    ) -> Result<ReconcileReport, CalendarError> {
        let (previous, update, generation) = {
            let mut board = self.board.write();
            let generation = board.generation();
            let blocks = board
                .blocks_mut(listing_id)
                .ok_or(CalendarError::UnknownListing(listing_id))?;
            let previous = blocks.clone();
            let update = blocks.unblock_update(&dates);
            blocks.unblock(&dates);
            (previous, update, generation)
        };
        let mut report = ReconcileReport::start(listing_id, None, dates);

        match self.store.update_blocked_days(listing_id, update).await {
            Ok(()) => {
                let replaced = self.board.read().generation() != generation;
                if replaced {
                    // The reload may have read the listing before this write landed.
                    report.enter(MutationPhase::Verifying);
                    if let Err(err) = self.reload_listing(listing_id).await {
                        warn!(
                            "unblock of listing {} saved but reload failed: {}",
                            listing_id, err
                        );
                        if let Some(blocks) = self.board.write().blocks_mut(listing_id) {
                            blocks.unblock(&report.dates);
                        }
                        report.enter(MutationPhase::Fallback);
                        let failure = CalendarError::VerificationFailure(err.to_string());
                        report.finish(ReconcileOutcome::Unverified, failure.user_message());
                        report.error = Some(failure);
                        self.notifier.notify(&report.notice());
                        return Ok(report);
                    }
                    report.resynced = true;
                }
                report.enter(MutationPhase::Confirmed);
                let message = format!(
                    "Unblocked {} {}.",
                    report.dates.len(),
                    plural(report.dates.len())
                );
                report.finish(ReconcileOutcome::Confirmed, message);
                info!("unblocked {:?} on listing {}", report.dates, listing_id);
            }
            Err(err) => {
                error!("unblock of listing {} failed: {}", listing_id, err);
                report.fail(err.into());
                match self.reload_listing(listing_id).await {
                    Ok(()) => report.resynced = true,
                    Err(reload_err) => {
                        warn!(
                            "reload of listing {} failed, rolling back: {}",
                            listing_id, reload_err
                        );
                        // After a full reload the row already holds the store's state.
                        let mut board = self.board.write();
                        if board.generation() == generation {
                            if let Some(blocks) = board.blocks_mut(listing_id) {
                                *blocks = previous;
                            }
                        }
                    }
                }
            }
        }

        self.notifier.notify(&report.notice());
        Ok(report)
    }

    /// Adds `dates` to the blocklist of `actor`. The other blocklist is left alone.
    ///
    /// A successful write is verified by reloading the listing. When that reload
    /// fails the union is applied locally and the outcome is `Unverified`. When
    /// the write itself fails the whole listing set is reloaded.
    pub async fn block(
        &self,
        listing_id: ListingId,
        dates: Vec<String>,
        actor: Actor,
    ) -> Result<ReconcileReport, CalendarError> {
        self.preflight(listing_id, &dates)?;
        let lock = self.listing_lock(listing_id);
        let result = {
            let _guard = lock.lock().await;
            self.block_locked(listing_id, dates, actor).await
        };
        self.release_listing_lock(listing_id, lock);
        result
    }

    async fn block_locked(
        &self,
        listing_id: ListingId,
        dates: Vec<String>,
        actor: Actor,
    ) -> Result<ReconcileReport, CalendarError> {
        let update = self
            .board
            .read()
            .blocks(listing_id)
            .map(|blocks| blocks.block_update(actor, &dates))
            .ok_or(CalendarError::UnknownListing(listing_id))?;
        let mut report = ReconcileReport::start(listing_id, Some(actor), dates);

        if let Err(err) = self.store.update_blocked_days(listing_id, update).await {
            error!("block of listing {} failed: {}", listing_id, err);
            report.fail(err.into());
            let filter = self.board.read().filter().clone();
            match self.reload_all(filter).await {
                Ok(_) => report.resynced = true,
                Err(reload_err) => warn!("full reload after failed block failed: {}", reload_err),
            }
            self.notifier.notify(&report.notice());
            return Ok(report);
        }

        report.enter(MutationPhase::Verifying);
        match self.reload_listing(listing_id).await {
            Ok(()) => {
                report.resynced = true;
                report.enter(MutationPhase::Confirmed);
                let message = format!(
                    "Blocked {} {} for {}.",
                    report.dates.len(),
                    plural(report.dates.len()),
                    actor
                );
                report.finish(ReconcileOutcome::Confirmed, message);
                info!(
                    "blocked {:?} on listing {} as {}",
                    report.dates, listing_id, actor
                );
            }
            Err(err) => {
                warn!(
                    "block of listing {} saved but reload failed: {}",
                    listing_id, err
                );
                if let Some(blocks) = self.board.write().blocks_mut(listing_id) {
                    blocks.block(actor, &report.dates);
                }
                report.enter(MutationPhase::Fallback);
                let failure = CalendarError::VerificationFailure(err.to_string());
                report.finish(ReconcileOutcome::Unverified, failure.user_message());
                report.error = Some(failure);
            }
        }

        self.notifier.notify(&report.notice());
        Ok(report)
    }

    /// Replaces the whole board with the listings matching `filter`.
    pub async fn reload_all(&self, filter: ListingFilter) -> Result<DataSource, CalendarError> {
        let page = self.store.fetch_listings(filter.clone()).await?;
        if page.source == DataSource::Fallback {
            self.notifier.notify(&Notice {
                level: NoticeLevel::Warning,
                listing_id: None,
                message: "Listings were loaded from the fallback data source.".to_string(),
            });
        }
        let mut board = self.board.write();
        board.replace_all(&page);
        board.set_filter(filter);
        info!("board reloaded with {} listings", board.len());
        Ok(page.source)
    }

    /// Replaces one listing's row with its authoritative record.
    pub async fn reload_listing(&self, listing_id: ListingId) -> Result<(), CalendarError> {
        let record = self.store.fetch_listing(listing_id).await?;
        self.board.write().replace_listing(&record);
        Ok(())
    }
}
