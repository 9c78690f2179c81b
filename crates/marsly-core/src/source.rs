// ── Transport seam ──
//
// The store only sees `ListingSource`. The production implementation is
// `marsly_api::MarsApiClient`; tests substitute scripted sources.

use futures_util::future::BoxFuture;
use tracing::debug;

use marsly_api::MarsApiClient;

use crate::error::CoreError;
use crate::model::{FilterKind, Listing};

/// Anything that can produce the listings for a filter.
///
/// Implementations own all network and decoding concerns. The returned
/// future is awaited exactly once per fetch and may be dropped early if
/// the store is torn down.
pub trait ListingSource: Send + Sync + 'static {
    fn fetch_listings(&self, filter: FilterKind) -> BoxFuture<'_, Result<Vec<Listing>, CoreError>>;
}

impl ListingSource for MarsApiClient {
    fn fetch_listings(&self, filter: FilterKind) -> BoxFuture<'_, Result<Vec<Listing>, CoreError>> {
        Box::pin(async move {
            let properties = self.list_properties(filter).await?;
            debug!(base_url = %self.base_url(), count = properties.len(), "fetched from API");
            Ok(properties.into_iter().map(Listing::from).collect())
        })
    }
}
