//! Feed listing: which articles are currently "the newest".
//!
//! The feed is a wiki page holding a declarative `<DynamicPageList>` block
//! whose rendered output is a list of links to the N most recent articles.
//! Because that rendered output is cached, [`list_recent`] purges the page
//! before parsing it; otherwise the listing is served stale and the bot keeps
//! republishing old articles.
//!
//! The declarative block itself is configuration, not hot-path data:
//! [`ensure_listing`] writes it once at startup. Hardcoding the block on
//! every start doubles as protection against vandalism of the listing page.

use crate::wiki::WikiClient;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

/// Edit summary for the listing block write.
const LISTING_SUMMARY: &str = "Bot odświeża listę najnowszych artykułów";

/// Titles of the current feed, newest first.
///
/// Purges the listing page, fetches its rendered form, and collects the
/// `title` attribute of every generated link in document order. The feed's
/// own freshness ordering is preserved; nothing is re-sorted here. Zero
/// matches is a valid result (empty feed), not an error.
#[instrument(level = "info", skip(client))]
pub async fn list_recent<C: WikiClient>(
    client: &C,
    feed_listing_page: &str,
) -> Result<Vec<String>, Box<dyn Error>> {
    client.purge(feed_listing_page).await?;
    let html = client.parse_rendered(feed_listing_page).await?;
    let titles = titles_from_rendered(&html);
    info!(count = titles.len(), feed_listing_page, "Listed current feed");
    debug!(?titles, "Feed titles");
    Ok(titles)
}

/// Collect article titles from the rendered listing HTML, in document order.
pub fn titles_from_rendered(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[title]").unwrap();

    document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("title"))
        .map(str::to_string)
        .collect()
}

/// Write the declarative listing block to the feed page.
///
/// One-time startup step; the per-cycle hot path only purges and parses.
#[instrument(level = "info", skip(client))]
pub async fn ensure_listing<C: WikiClient>(
    client: &C,
    feed_listing_page: &str,
    article_count: u32,
) -> Result<(), Box<dyn Error>> {
    let content = format!(
        "<DynamicPageList>\n\
         namespace=0\n\
         count={article_count}\n\
         notcategory=tworzone\n\
         notcategory=archiwalne\n\
         notcategory=Wyróżnione\n\
         </DynamicPageList>"
    );
    client
        .write_source(feed_listing_page, &content, LISTING_SUMMARY)
        .await?;
    info!(feed_listing_page, article_count, "Wrote feed listing block");
    Ok(())
}
