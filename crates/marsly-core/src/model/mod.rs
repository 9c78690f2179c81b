// ── Domain model ──
//
// Types handed to UI consumers. API wire types are converted into these
// in `crate::convert` and never leak past the core.

pub mod listing;

pub use listing::{Listing, ListingDetail, ListingKind};

pub use marsly_api::FilterKind;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Status of the most recent fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FetchStatus {
    Loading,
    Error,
    Done,
}
