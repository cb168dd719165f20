// --- File: crates/staylist_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The calendar engine talks to the remote listing store only through these traits,
//! which keeps it testable against in-memory implementations.

use std::future::Future;
use std::pin::Pin;

use crate::error::StoreError;
use crate::models::{BlockedDaysUpdate, ListingFilter, ListingId, ListingPage, ListingRecord};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Read/write access to listing records on the remote store.
pub trait ListingStore: Send + Sync {
    /// Fetch the authoritative record of one listing.
    fn fetch_listing(&self, listing_id: ListingId) -> BoxFuture<'_, ListingRecord, StoreError>;

    /// Fetch every listing matching `filter`.
    fn fetch_listings(&self, filter: ListingFilter) -> BoxFuture<'_, ListingPage, StoreError>;

    /// Write one or both blocklist fields. Re-sending the same value is a no-op.
    fn update_blocked_days(
        &self,
        listing_id: ListingId,
        update: BlockedDaysUpdate,
    ) -> BoxFuture<'_, (), StoreError>;
}
