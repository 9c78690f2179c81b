// ── Fetch handles ──
//
// One handle per `ListingStore::fetch` call. Dropping a handle detaches
// it; the fetch still runs and still commits.

use tokio::task::JoinHandle;
use tracing::warn;

use crate::model::{FetchStatus, FilterKind};

/// What happened to a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was committed; the store's status became this value.
    Applied(FetchStatus),
    /// A newer fetch was issued first, so the result was discarded.
    /// Only produced under `FetchOrdering::LatestRequested`.
    Superseded,
    /// The store was torn down before the result could be committed.
    Cancelled,
}

/// Handle to an in-flight fetch, returned by
/// [`ListingStore::fetch`](crate::ListingStore::fetch).
#[derive(Debug)]
pub struct FetchHandle {
    seq: u64,
    filter: FilterKind,
    task: Option<JoinHandle<FetchOutcome>>,
}

impl FetchHandle {
    pub(crate) fn spawned(seq: u64, filter: FilterKind, task: JoinHandle<FetchOutcome>) -> Self {
        Self {
            seq,
            filter,
            task: Some(task),
        }
    }

    /// A handle for a fetch that was refused because the store is closed.
    pub(crate) fn refused(filter: FilterKind) -> Self {
        Self {
            seq: 0,
            filter,
            task: None,
        }
    }

    /// Sequence number of this fetch; `0` if it was never started.
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    /// Whether the fetch has finished (committed, discarded or cancelled).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the fetch to finish.
    pub async fn wait(self) -> FetchOutcome {
        let Some(task) = self.task else {
            return FetchOutcome::Cancelled;
        };

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_panic() {
                    warn!(seq = self.seq, "listing source panicked during fetch");
                }
                FetchOutcome::Cancelled
            }
        }
    }
}
