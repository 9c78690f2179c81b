//! `marsly watch`: refetch on an interval and print every observed change.
//!
//! Output comes from store subscriptions, not from fetch results, so the
//! lines show exactly what a rendering screen would see.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use marsly_core::{FetchOutcome, FetchStatus};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::Session;
use super::util;

type PendingFetch = Pin<Box<dyn Future<Output = FetchOutcome> + Send>>;

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum Event {
    Status { status: FetchStatus },
    Listings { count: usize },
}

pub async fn handle(session: &Session, args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = util::open_store(session, args.filter);
    let filter = store.config().default_filter;
    let every = Duration::from_secs(
        args.interval
            .unwrap_or(session.config.defaults.refresh_interval)
            .max(1),
    );

    let mut status = store.subscribe_status();
    let mut listings = store.subscribe_listings();
    let mut pending: Option<PendingFetch> = store
        .take_initial_fetch()
        .map(|handle| Box::pin(handle.wait()) as PendingFetch);

    emit(session, global, &Event::Status { status: *status.current() })?;

    let mut ticker = tokio::time::interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut completed: u32 = 0;

    loop {
        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping watch");
                break;
            }
            Some(value) = status.changed() => {
                emit(session, global, &Event::Status { status: value })?;
            }
            Some(snapshot) = listings.changed() => {
                emit(session, global, &Event::Listings { count: snapshot.len() })?;
            }
            outcome = next_outcome(&mut pending) => {
                debug!(?outcome, "fetch finished");
                completed += 1;
                if args.count.is_some_and(|n| completed >= n) {
                    break;
                }
            }
            _ = ticker.tick() => {
                if pending.is_some() {
                    debug!("previous fetch still running, skipping refresh");
                } else {
                    pending = Some(Box::pin(store.fetch(filter).wait()));
                }
            }
        }
    }

    store.shutdown().await;
    Ok(())
}

/// Resolve the in-flight fetch, or never if there is none.
///
/// Dropping this future (another branch won) leaves the fetch in place.
async fn next_outcome(pending: &mut Option<PendingFetch>) -> FetchOutcome {
    match pending.as_mut() {
        Some(fut) => {
            let outcome = fut.await;
            *pending = None;
            outcome
        }
        None => std::future::pending().await,
    }
}

fn emit(session: &Session, global: &GlobalOpts, event: &Event) -> Result<(), CliError> {
    let line = match session.format {
        OutputFormat::Json | OutputFormat::JsonCompact => output::render_json(event, true)?,
        _ => render_text(event, session.color),
    };
    output::print_output(&line, global.quiet);
    Ok(())
}

fn render_text(event: &Event, color: bool) -> String {
    match event {
        Event::Status { status } => format!("status: {}", output::paint_status(*status, color)),
        Event::Listings { count } => format!("listings: {count}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn events_render_as_text_and_json() {
        let status = Event::Status {
            status: FetchStatus::Done,
        };
        assert_eq!(render_text(&status, false), "status: done");
        assert_eq!(
            output::render_json(&status, true).unwrap(),
            r#"{"event":"status","status":"done"}"#
        );

        let listings = Event::Listings { count: 3 };
        assert_eq!(render_text(&listings, false), "listings: 3");
        assert_eq!(
            output::render_json(&listings, true).unwrap(),
            r#"{"event":"listings","count":3}"#
        );
    }

    #[tokio::test]
    async fn next_outcome_clears_the_slot() {
        let mut pending: Option<PendingFetch> =
            Some(Box::pin(async { FetchOutcome::Applied(FetchStatus::Done) }));

        assert_eq!(
            next_outcome(&mut pending).await,
            FetchOutcome::Applied(FetchStatus::Done)
        );
        assert!(pending.is_none());
    }
}
