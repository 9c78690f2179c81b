// ── Runtime store configuration ──
//
// These types describe how a `ListingStore` behaves. They never touch
// disk: the CLI (via marsly-config) constructs a `StoreConfig` and hands
// it in.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::FilterKind;

/// How results from overlapping fetches are committed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FetchOrdering {
    /// Every result is committed when it arrives; the last fetch to
    /// resolve wins, even if it was issued first.
    #[default]
    LastResolved,
    /// Each fetch is tagged with a sequence number and only the most
    /// recently issued one may commit. Stale results are discarded.
    LatestRequested,
}

/// Configuration for a single [`ListingStore`](crate::ListingStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Filter used by the automatic fetch at construction.
    pub default_filter: FilterKind,
    /// Commit policy for overlapping fetches.
    pub ordering: FetchOrdering,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_filter: FilterKind::ShowAll,
            ordering: FetchOrdering::LastResolved,
        }
    }
}
