//! `marsly show <id>`: select one listing and render its detail view.
//!
//! Goes through the same select / observe / clear cycle a listings screen
//! uses to navigate to a detail page.

use marsly_core::ListingDetail;

use crate::cli::{GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output;

use super::Session;
use super::util;

pub async fn handle(session: &Session, args: ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = util::open_store(session, args.filter);
    util::settle(&store, session, global.quiet).await?;

    let not_found = || CliError::NotFound {
        id: args.id.clone(),
        filter: store.config().default_filter.to_string(),
    };

    let mut navigation = store.subscribe_selected();
    if store.select_by_id(&args.id).is_none() {
        return Err(not_found());
    }
    let listing = navigation.changed().await.flatten().ok_or_else(not_found)?;

    let detail = ListingDetail::from(listing.as_ref());
    let color = session.color;
    let out = output::render_single(
        &session.format,
        &detail,
        |d| render_detail(d, color),
        |d| d.id.clone(),
    )?;
    output::print_output(&out, global.quiet);

    // Navigation consumed.
    store.clear_selection();
    store.shutdown().await;
    Ok(())
}

fn render_detail(detail: &ListingDetail, color: bool) -> String {
    [
        format!("ID:     {}", detail.id),
        format!(
            "Type:   {}",
            output::paint_kind(&detail.type_label, detail.kind, color)
        ),
        format!("Price:  {}", detail.price),
        format!("Image:  {}", detail.img_src),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use marsly_core::Listing;

    use super::*;

    #[test]
    fn detail_lists_every_field() {
        let listing = Listing {
            id: "424905".into(),
            img_src: "http://mars.jpl.nasa.gov/b.jpg".into(),
            property_type: "buy".into(),
            price: 8_000_000.0,
        };
        let text = render_detail(&ListingDetail::from(&listing), false);

        assert_eq!(
            text,
            "ID:     424905\n\
             Type:   For Sale\n\
             Price:  $8,000,000\n\
             Image:  http://mars.jpl.nasa.gov/b.jpg"
        );
    }
}
