// --- File: crates/staylist_calendar/src/store_mock.rs ---
//! In-memory listing store and notifier for unit tests.

use staylist_common::{
    BlockedDaysUpdate, BoxFuture, DataSource, ListingFilter, ListingId, ListingPage,
    ListingRecord, ListingStore, StoreError,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::reconciler::{Notice, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchListing(ListingId),
    FetchListings,
    /// Recorded when the write lands, after any injected delay.
    Update(ListingId, BlockedDaysUpdate),
}

/// Listing store backed by a map, with queued failures and write delays.
#[derive(Default)]
pub struct MockListingStore {
    records: Mutex<BTreeMap<ListingId, ListingRecord>>,
    source: Mutex<Option<DataSource>>,
    update_failures: Mutex<VecDeque<StoreError>>,
    fetch_failures: Mutex<VecDeque<StoreError>>,
    list_failures: Mutex<VecDeque<StoreError>>,
    update_delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<StoreCall>>,
}

pub fn record(id: u64, admin: &str, host: &str) -> ListingRecord {
    ListingRecord {
        id: ListingId(id),
        title: format!("Listing {}", id),
        status: "publish".to_string(),
        admin_blocked_days_raw: admin.to_string(),
        host_blocked_days_raw: host.to_string(),
    }
}

pub fn days(list: &[&str]) -> Vec<String> {
    list.iter().map(|day| day.to_string()).collect()
}

impl MockListingStore {
    pub fn with_records(records: Vec<ListingRecord>) -> Self {
        let store = Self::default();
        {
            let mut map = store.records.lock().unwrap();
            for record in records {
                map.insert(record.id, record);
            }
        }
        store
    }

    pub fn serve_from(&self, source: DataSource) {
        *self.source.lock().unwrap() = Some(source);
    }

    pub fn fail_next_update(&self, err: StoreError) {
        self.update_failures.lock().unwrap().push_back(err);
    }

    pub fn fail_next_fetch(&self, err: StoreError) {
        self.fetch_failures.lock().unwrap().push_back(err);
    }

    pub fn fail_next_list(&self, err: StoreError) {
        self.list_failures.lock().unwrap().push_back(err);
    }

    /// Delays the next write by `delay`. Queued per write, in call order.
    pub fn delay_next_update(&self, delay: Duration) {
        self.update_delays.lock().unwrap().push_back(delay);
    }

    /// Sets a stored field directly, as another client would.
    pub fn set_remote(&self, id: u64, admin: &str, host: &str) {
        self.records
            .lock()
            .unwrap()
            .insert(ListingId(id), record(id, admin, host));
    }

    pub fn stored(&self, id: u64) -> ListingRecord {
        self.records.lock().unwrap()[&ListingId(id)].clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(ListingId, BlockedDaysUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Update(id, update) => Some((id, update)),
                _ => None,
            })
            .collect()
    }
}

impl ListingStore for MockListingStore {
    fn fetch_listing(&self, listing_id: ListingId) -> BoxFuture<'_, ListingRecord, StoreError> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(StoreCall::FetchListing(listing_id));
            if let Some(err) = self.fetch_failures.lock().unwrap().pop_front() {
                return Err(err);
            }
            self.records
                .lock()
                .unwrap()
                .get(&listing_id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("listing {}", listing_id)))
        })
    }

    fn fetch_listings(&self, _filter: ListingFilter) -> BoxFuture<'_, ListingPage, StoreError> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(StoreCall::FetchListings);
            if let Some(err) = self.list_failures.lock().unwrap().pop_front() {
                return Err(err);
            }
            let listings = self.records.lock().unwrap().values().cloned().collect();
            let source = self.source.lock().unwrap().unwrap_or(DataSource::Primary);
            Ok(ListingPage { listings, source })
        })
    }

    fn update_blocked_days(
        &self,
        listing_id: ListingId,
        update: BlockedDaysUpdate,
    ) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move {
            let delay = self.update_delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let failure = self.update_failures.lock().unwrap().pop_front();
            if let Some(err) = failure {
                return Err(err);
            }
            self.calls
                .lock()
                .unwrap()
                .push(StoreCall::Update(listing_id, update.clone()));
            let mut records = self.records.lock().unwrap();
            let record = records
                .get_mut(&listing_id)
                .ok_or_else(|| StoreError::NotFound(format!("listing {}", listing_id)))?;
            if let Some(admin) = update.admin_blocked_days_raw {
                record.admin_blocked_days_raw = admin;
            }
            if let Some(host) = update.host_blocked_days_raw {
                record.host_blocked_days_raw = host;
            }
            Ok(())
        })
    }
}

/// Notifier that keeps every notice.
#[derive(Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
