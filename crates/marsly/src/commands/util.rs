//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use marsly_core::{FetchOutcome, FetchStatus, FilterKind, Listing, ListingStore, StoreConfig};

use crate::cli::FilterArg;
use crate::error::CliError;

use super::Session;

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Rent => Self::ShowRent,
            FilterArg::Buy => Self::ShowBuy,
            FilterArg::All => Self::ShowAll,
        }
    }
}

/// Open a store whose initial fetch uses `filter`, or the configured
/// default filter when none is given.
///
/// Starting with the requested filter means one request per command, and
/// an empty result shows as an empty list instead of a stale `all` set.
pub fn open_store(session: &Session, filter: Option<FilterArg>) -> ListingStore {
    let mut store_config: StoreConfig = session.config.store_config();
    if let Some(filter) = filter {
        store_config.default_filter = filter.into();
    }
    ListingStore::new(Arc::clone(&session.source), store_config)
}

/// Wait for the store's initial fetch and check that it succeeded.
pub async fn settle(store: &ListingStore, session: &Session, quiet: bool) -> Result<(), CliError> {
    let filter = store.config().default_filter;
    let spinner = loading_spinner(filter, quiet);

    let outcome = match store.take_initial_fetch() {
        Some(handle) => handle.wait().await,
        None => FetchOutcome::Cancelled,
    };
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    tracing::debug!(?outcome, "initial fetch finished");

    match store.status() {
        FetchStatus::Done => Ok(()),
        FetchStatus::Loading | FetchStatus::Error => Err(CliError::FetchFailed {
            filter: filter.to_string(),
            url: session.config.api.base_url.clone(),
        }),
    }
}

/// A stderr spinner while loading; only when stderr is a terminal.
fn loading_spinner(filter: FilterKind, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching {filter} listings..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ListingRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Image")]
    pub image: String,
}

impl ListingRow {
    pub fn new(listing: &Listing, color: bool) -> Self {
        Self {
            id: listing.id.clone(),
            kind: crate::output::paint_kind(&listing.display_type(), listing.kind(), color),
            price: listing.display_price(),
            image: listing.img_src.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_args_map_to_api_filters() {
        assert_eq!(FilterKind::from(FilterArg::Rent), FilterKind::ShowRent);
        assert_eq!(FilterKind::from(FilterArg::Buy), FilterKind::ShowBuy);
        assert_eq!(FilterKind::from(FilterArg::All), FilterKind::ShowAll);
    }

    #[test]
    fn row_uses_display_values() {
        let listing = Listing {
            id: "424906".into(),
            img_src: "http://mars.jpl.nasa.gov/a.jpg".into(),
            property_type: "rent".into(),
            price: 87_000.0,
        };
        let row = ListingRow::new(&listing, false);
        assert_eq!(row.kind, "For Rent");
        assert_eq!(row.price, "$87,000/month");
    }
}
