// --- File: crates/staylist_calendar/src/blocklist.rs ---
//! Per-listing blocklists.
//!
//! The store keeps each blocklist as one comma-joined string field
//! (`2024-06-01,2024-06-02`). Here they are parsed into ordered sets so that
//! serialization is deterministic.

use serde::{Deserialize, Serialize};
use staylist_common::{BlockedDaysUpdate, ListingId, ListingRecord};
use std::collections::BTreeSet;
use std::fmt;

use crate::status::{resolve, CellStatus};

/// A set of `YYYY-MM-DD` day strings.
pub type DateSet = BTreeSet<String>;

/// Who a block is recorded for. Picks the target blocklist of a block action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Admin,
    Host,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Admin => write!(f, "admin"),
            Actor::Host => write!(f, "host"),
        }
    }
}

/// Splits a comma-joined field into a set. Never fails: garbage in, fewer dates out.
pub fn parse(raw: &str) -> DateSet {
    raw.split(',')
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins a set back into its stored form, sorted.
pub fn serialize(set: &DateSet) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

pub fn merge(existing: &DateSet, to_add: &[String]) -> DateSet {
    let mut merged = existing.clone();
    merged.extend(to_add.iter().cloned());
    merged
}

pub fn subtract(existing: &DateSet, to_remove: &[String]) -> DateSet {
    let mut remaining = existing.clone();
    for date in to_remove {
        remaining.remove(date);
    }
    remaining
}

/// Both blocklists of one listing.
///
/// A day may sit in both sets at once; reads resolve it as host-blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBlockSet {
    pub listing_id: ListingId,
    pub admin_blocked: DateSet,
    pub host_blocked: DateSet,
}

impl DateBlockSet {
    pub fn new(listing_id: ListingId) -> Self {
        Self {
            listing_id,
            admin_blocked: DateSet::new(),
            host_blocked: DateSet::new(),
        }
    }

    pub fn from_record(record: &ListingRecord) -> Self {
        Self {
            listing_id: record.id,
            admin_blocked: parse(&record.admin_blocked_days_raw),
            host_blocked: parse(&record.host_blocked_days_raw),
        }
    }

    pub fn status(&self, date: &str) -> CellStatus {
        resolve(&self.admin_blocked, &self.host_blocked, date)
    }

    pub fn target(&self, actor: Actor) -> &DateSet {
        match actor {
            Actor::Admin => &self.admin_blocked,
            Actor::Host => &self.host_blocked,
        }
    }

    /// The value the target blocklist takes after blocking `dates` as `actor`.
    pub fn blocked_with(&self, actor: Actor, dates: &[String]) -> DateSet {
        merge(self.target(actor), dates)
    }

    pub fn block(&mut self, actor: Actor, dates: &[String]) {
        let merged = self.blocked_with(actor, dates);
        match actor {
            Actor::Admin => self.admin_blocked = merged,
            Actor::Host => self.host_blocked = merged,
        }
    }

    /// Removes `dates` from both blocklists, whichever they were in.
    pub fn unblock(&mut self, dates: &[String]) {
        self.admin_blocked = subtract(&self.admin_blocked, dates);
        self.host_blocked = subtract(&self.host_blocked, dates);
    }

    /// Store write that blocks `dates` as `actor`. Only the target field is sent.
    pub fn block_update(&self, actor: Actor, dates: &[String]) -> BlockedDaysUpdate {
        let value = serialize(&self.blocked_with(actor, dates));
        match actor {
            Actor::Admin => BlockedDaysUpdate {
                admin_blocked_days_raw: Some(value),
                host_blocked_days_raw: None,
            },
            Actor::Host => BlockedDaysUpdate {
                admin_blocked_days_raw: None,
                host_blocked_days_raw: Some(value),
            },
        }
    }

    /// Store write that clears `dates` from both fields.
    pub fn unblock_update(&self, dates: &[String]) -> BlockedDaysUpdate {
        BlockedDaysUpdate {
            admin_blocked_days_raw: Some(serialize(&subtract(&self.admin_blocked, dates))),
            host_blocked_days_raw: Some(serialize(&subtract(&self.host_blocked, dates))),
        }
    }
}
