//! Observable listing state between `marsly-api` and UI consumers.
//!
//! This crate owns the domain model and the state holder a listings
//! screen renders from:
//!
//! - **[`ListingStore`]**: Holds the fetch status, the listing collection
//!   and the selection awaiting navigation. [`fetch()`](ListingStore::fetch)
//!   flips the status to `Loading` synchronously and commits the result from
//!   a spawned task; [`teardown()`](ListingStore::teardown) (or dropping the
//!   store) cancels everything still in flight.
//!
//! - **[`StateStream<T>`]**: Subscription handle for one store field.
//!   Exposes `current()` / `latest()` / `changed()` and converts into a
//!   `Stream` for reactive rendering.
//!
//! - **[`ListingSource`]**: The transport seam. Implemented for
//!   [`marsly_api::MarsApiClient`]; tests plug in scripted sources.
//!
//! - **Domain model** ([`model`]): [`Listing`], [`ListingDetail`],
//!   [`FetchStatus`] and [`FilterKind`].

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod source;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{FetchOrdering, StoreConfig};
pub use error::CoreError;
pub use model::{FetchStatus, FilterKind, Listing, ListingDetail, ListingKind};
pub use source::ListingSource;
pub use store::{FetchHandle, FetchOutcome, ListingSnapshot, ListingStore};
pub use stream::{StateStream, StateWatchStream};

pub use marsly_api::MarsApiClient;
