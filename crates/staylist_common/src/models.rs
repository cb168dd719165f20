// --- File: crates/staylist_common/src/models.rs ---

// Listing records as exchanged with the remote store, plus the small
// payloads the store operations take.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a listing post on the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ListingId(pub u64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ListingId {
    fn from(id: u64) -> Self {
        ListingId(id)
    }
}

/// A listing as read from the store.
///
/// The blocked-day fields are kept in their raw comma-joined form; parsing them is
/// the calendar's job and must never fail the read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListingRecord {
    pub id: ListingId,
    pub title: String,
    pub status: String,
    pub admin_blocked_days_raw: String,
    pub host_blocked_days_raw: String,
}

/// Partial write of the two blocklist fields. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDaysUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_blocked_days_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_blocked_days_raw: Option<String>,
}

impl BlockedDaysUpdate {
    pub fn is_empty(&self) -> bool {
        self.admin_blocked_days_raw.is_none() && self.host_blocked_days_raw.is_none()
    }
}

/// Query for the listing rows shown in the calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Post status, e.g. "publish" or "draft".
    pub status: Option<String>,
    /// Free-text search forwarded to the store.
    pub search: Option<String>,
}

/// Where a listing read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Primary,
    Fallback,
}

/// Result of a listing list read, tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub listings: Vec<ListingRecord>,
    pub source: DataSource,
}
