// ── Listing store ──
//
// Owns the three observable fields a listings screen renders from:
// fetch status, the listing collection, and the selection awaiting
// navigation. Every field is a `watch` channel, so each update is one
// atomic replacement that subscribers observe whole.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::config::{FetchOrdering, StoreConfig};
use crate::error::CoreError;
use crate::model::{FetchStatus, FilterKind, Listing};
use crate::source::ListingSource;
use crate::stream::StateStream;

use super::fetch::{FetchHandle, FetchOutcome};

/// Snapshot of the listing collection handed to observers.
pub type ListingSnapshot = Arc<Vec<Arc<Listing>>>;

/// Observable state holder for one listings screen.
///
/// Construction immediately starts a fetch with the configured default
/// filter (`ShowAll` unless overridden). The store is bound to its owner:
/// dropping it, or calling [`teardown()`](Self::teardown), cancels every
/// outstanding fetch and freezes all fields.
///
/// Overlapping fetches are not cancelled. Under the default
/// [`FetchOrdering::LastResolved`] whichever resolves last wins; use
/// [`FetchOrdering::LatestRequested`] to discard stale results instead.
pub struct ListingStore {
    shared: Arc<Shared>,
    initial: Mutex<Option<FetchHandle>>,
}

struct Shared {
    source: Arc<dyn ListingSource>,
    config: StoreConfig,
    status: watch::Sender<FetchStatus>,
    listings: watch::Sender<ListingSnapshot>,
    selected: watch::Sender<Option<Arc<Listing>>>,
    cancel: CancellationToken,
    tasks: TaskTracker,
    /// Sequence number of the most recently issued fetch.
    latest_seq: AtomicU64,
    /// Held while writing fields so teardown cannot interleave.
    commit: Mutex<()>,
}

impl ListingStore {
    /// Create a store and start the initial fetch.
    ///
    /// The initial fetch uses `config.default_filter`, which is
    /// [`FilterKind::ShowAll`] for [`StoreConfig::default()`]. Overriding it
    /// changes what the first fetch requests; the CLI does this so
    /// `list --filter rent` issues a single `rent` request.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn new(source: Arc<dyn ListingSource>, config: StoreConfig) -> Self {
        let (status, _) = watch::channel(FetchStatus::Loading);
        let (listings, _) = watch::channel(Arc::new(Vec::new()));
        let (selected, _) = watch::channel(None);

        let default_filter = config.default_filter;
        let store = Self {
            shared: Arc::new(Shared {
                source,
                config,
                status,
                listings,
                selected,
                cancel: CancellationToken::new(),
                tasks: TaskTracker::new(),
                latest_seq: AtomicU64::new(0),
                commit: Mutex::new(()),
            }),
            initial: Mutex::new(None),
        };

        let handle = store.fetch(default_filter);
        *lock(&store.initial) = Some(handle);
        store
    }

    /// Create a store with the default configuration.
    pub fn with_source(source: Arc<dyn ListingSource>) -> Self {
        Self::new(source, StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }

    // ── Operations ───────────────────────────────────────────────

    /// Fetch listings for `filter`.
    ///
    /// The status becomes [`FetchStatus::Loading`] before this returns;
    /// the request itself runs on a spawned task. Calling this after
    /// teardown changes nothing and yields a handle that reports
    /// [`FetchOutcome::Cancelled`].
    pub fn fetch(&self, filter: FilterKind) -> FetchHandle {
        let shared = &self.shared;

        let seq = {
            let _guard = lock(&shared.commit);
            if shared.cancel.is_cancelled() {
                debug!(%filter, "store torn down, ignoring fetch");
                return FetchHandle::refused(filter);
            }
            let seq = shared.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
            shared.status.send_replace(FetchStatus::Loading);
            seq
        };

        debug!(seq, %filter, "fetch started");
        let task = shared.tasks.spawn(Arc::clone(shared).run_fetch(seq, filter));
        FetchHandle::spawned(seq, filter, task)
    }

    /// Record `item` as the listing the user navigated to.
    pub fn select(&self, item: Arc<Listing>) {
        let _guard = lock(&self.shared.commit);
        if self.shared.cancel.is_cancelled() {
            return;
        }
        debug!(id = %item.id, "listing selected");
        self.shared.selected.send_replace(Some(item));
    }

    /// Select the listing with `id` from the current snapshot.
    ///
    /// Returns the selected listing, or `None` (selection untouched) if no
    /// listing has that id.
    pub fn select_by_id(&self, id: &str) -> Option<Arc<Listing>> {
        let listing = self.listing_by_id(id)?;
        self.select(Arc::clone(&listing));
        Some(listing)
    }

    /// Mark the pending navigation as consumed. Idempotent.
    pub fn clear_selection(&self) {
        let _guard = lock(&self.shared.commit);
        if self.shared.cancel.is_cancelled() {
            return;
        }
        self.shared.selected.send_if_modified(|sel| sel.take().is_some());
    }

    /// Hand out the handle of the fetch started by the constructor.
    ///
    /// Returns `None` on every call after the first.
    pub fn take_initial_fetch(&self) -> Option<FetchHandle> {
        lock(&self.initial).take()
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Cancel all outstanding fetches and freeze the store. Idempotent.
    ///
    /// Once this returns no field changes again, even if transport work
    /// that was already in flight completes later.
    pub fn teardown(&self) {
        {
            let _guard = lock(&self.shared.commit);
            if self.shared.cancel.is_cancelled() {
                return;
            }
            self.shared.cancel.cancel();
        }
        self.shared.tasks.close();
        info!(in_flight = self.shared.tasks.len(), "listing store torn down");
    }

    /// Tear down and wait for every spawned fetch task to exit.
    pub async fn shutdown(&self) {
        self.teardown();
        self.shared.tasks.wait().await;
        debug!("listing store shut down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    // ── State observation ────────────────────────────────────────

    pub fn status(&self) -> FetchStatus {
        *self.shared.status.borrow()
    }

    pub fn listings(&self) -> ListingSnapshot {
        self.shared.listings.borrow().clone()
    }

    pub fn selected(&self) -> Option<Arc<Listing>> {
        self.shared.selected.borrow().clone()
    }

    /// Look up a listing in the current snapshot.
    pub fn listing_by_id(&self, id: &str) -> Option<Arc<Listing>> {
        self.shared
            .listings
            .borrow()
            .iter()
            .find(|l| l.id == id)
            .cloned()
    }

    pub fn subscribe_status(&self) -> StateStream<FetchStatus> {
        StateStream::new(self.shared.status.subscribe())
    }

    pub fn subscribe_listings(&self) -> StateStream<ListingSnapshot> {
        StateStream::new(self.shared.listings.subscribe())
    }

    pub fn subscribe_selected(&self) -> StateStream<Option<Arc<Listing>>> {
        StateStream::new(self.shared.selected.subscribe())
    }
}

impl Drop for ListingStore {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ListingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingStore")
            .field("status", &self.status())
            .field("listings", &self.shared.listings.borrow().len())
            .field("selected", &self.selected().map(|l| l.id.clone()))
            .field("torn_down", &self.is_torn_down())
            .finish_non_exhaustive()
    }
}

// ── Fetch task ───────────────────────────────────────────────────

impl Shared {
    async fn run_fetch(self: Arc<Self>, seq: u64, filter: FilterKind) -> FetchOutcome {
        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(seq, %filter, "fetch cancelled");
                return FetchOutcome::Cancelled;
            }
            result = self.source.fetch_listings(filter) => result,
        };

        self.commit(seq, filter, result)
    }

    /// Apply a fetch result to the observable fields.
    ///
    /// Success always sets `Done` but only a non-empty result replaces the
    /// listings. Failure sets `Error` and always clears the listings.
    fn commit(
        &self,
        seq: u64,
        filter: FilterKind,
        result: Result<Vec<Listing>, CoreError>,
    ) -> FetchOutcome {
        let _guard = lock(&self.commit);

        if self.cancel.is_cancelled() {
            debug!(seq, %filter, "store torn down, dropping fetch result");
            return FetchOutcome::Cancelled;
        }

        if self.config.ordering == FetchOrdering::LatestRequested
            && seq != self.latest_seq.load(Ordering::SeqCst)
        {
            debug!(seq, %filter, "discarding superseded fetch result");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(listings) => {
                self.status.send_replace(FetchStatus::Done);
                if listings.is_empty() {
                    debug!(seq, %filter, "fetch returned no listings, keeping previous");
                } else {
                    debug!(seq, %filter, count = listings.len(), "fetch complete");
                    let snapshot = listings.into_iter().map(Arc::new).collect();
                    self.listings.send_replace(Arc::new(snapshot));
                }
                FetchOutcome::Applied(FetchStatus::Done)
            }
            Err(e) => {
                warn!(seq, %filter, error = %e, "listing fetch failed");
                self.status.send_replace(FetchStatus::Error);
                self.listings.send_replace(Arc::new(Vec::new()));
                FetchOutcome::Applied(FetchStatus::Error)
            }
        }
    }
}

/// Lock ignoring poison: the guarded sections only assign whole values.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
