// ── Observable listing store ──
//
// Fetch-and-display state with push-based change notification.

mod fetch;
mod listing_store;


pub use fetch::{FetchHandle, FetchOutcome};
pub use listing_store::{ListingSnapshot, ListingStore};
