//! `marsly list`: fetch and print the listings for one filter.

use std::sync::Arc;

use marsly_core::Listing;

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::Session;
use super::util::{self, ListingRow};

pub async fn handle(session: &Session, args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = util::open_store(session, args.filter);
    util::settle(&store, session, global.quiet).await?;

    let listings = store.listings();
    let out = output::render_list(
        &session.format,
        listings.as_slice(),
        |l: &Arc<Listing>| ListingRow::new(l, session.color),
        |l| l.id.clone(),
    )?;
    output::print_output(&out, global.quiet);

    store.shutdown().await;
    Ok(())
}
