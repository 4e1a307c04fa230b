//! Publish orchestration: one cycle for one front-page target.
//!
//! A cycle maps the current feed onto numbered subpages: feed position `i`
//! (0-based) is read, its fields extracted, the sneak peek rendered, and the
//! result written to subpage `i + 1`. After all writes, the parent page is
//! purged exactly once so readers see the new content.
//!
//! # Failure semantics
//!
//! Steps are strictly sequential and nothing is rolled back. A repository
//! error aborts the rest of this cycle: already-written subpages stay
//! written, the remaining positions and the parent purge are skipped. The
//! caller (the scheduler sweep) decides what a failed cycle means for other
//! targets.
//!
//! Subpages beyond the current feed length are never cleared; a shrinking
//! feed leaves the trailing subpages holding their last good content. There
//! is also no edit-conflict detection: a concurrent human edit to a subpage
//! loses to the bot's next write.

use crate::extract::extract_all;
use crate::feed::list_recent;
use crate::models::{PublishJob, TargetConfig};
use crate::render::render;
use crate::wiki::WikiClient;
use std::error::Error;
use tracing::{debug, info, instrument};

/// Edit summary recorded with every sneak-peek write.
const SNEAK_PEEK_SUMMARY: &str = "Bot zmienia artykuł do ekspozycji";

/// Run one publish cycle for one target.
///
/// Empty feed: zero reads, zero writes, no parent purge, returns `Ok`.
#[instrument(level = "info", skip(client, target), fields(page = %target.page_to_purge))]
pub async fn run_cycle<C: WikiClient>(
    client: &C,
    target: &TargetConfig,
) -> Result<(), Box<dyn Error>> {
    let titles = list_recent(client, &target.feed_listing_page).await?;
    let job = PublishJob::new(target.clone(), titles);

    if job.titles.is_empty() {
        info!(feed = %target.feed_listing_page, "Feed is empty; nothing to publish");
        return Ok(());
    }

    for (i, title) in job.titles.iter().enumerate() {
        let subpage = job.target.subpage(i);
        publish_sneak_peek(client, title, &subpage).await?;
    }

    client.purge(&job.target.page_to_purge).await?;
    info!(
        page = %job.target.page_to_purge,
        articles = job.titles.len(),
        "Published cycle and purged parent page"
    );
    Ok(())
}

/// Read one article, extract its fields, and write its sneak peek.
async fn publish_sneak_peek<C: WikiClient>(
    client: &C,
    title: &str,
    subpage: &str,
) -> Result<(), Box<dyn Error>> {
    let raw = client.read_source(title).await?;
    let fields = extract_all(&raw);
    debug!(title, ?fields, "Extracted article fields");
    let content = render(title, &fields);
    client
        .write_source(subpage, &content, SNEAK_PEEK_SUMMARY)
        .await?;
    info!(title, subpage, "Wrote sneak peek");
    Ok(())
}
