//! # Frontpage Bot
//!
//! A scheduled syndication bot that keeps a wiki's front page fresh: it
//! periodically reads the wiki's "most recent articles" feed, extracts
//! structured metadata (date, lead sentence, image, portal) from each
//! article's raw wikitext, renders a fixed sneak-peek template per article,
//! writes the results to numbered front-page subpages, and purges the front
//! page's render cache.
//!
//! ## Usage
//!
//! ```sh
//! frontpage_bot --config config.yaml
//! ```
//!
//! ## Architecture
//!
//! One sweep per period, each sweep covering every configured target:
//! 1. **Feed listing**: purge and parse the dynamic listing page to learn
//!    which articles are current
//! 2. **Extraction**: read each article's wikitext and pull out its fields
//! 3. **Rendering**: produce the sneak-peek template invocation
//! 4. **Publishing**: overwrite the numbered subpages, then purge the parent
//!
//! Targets are independent failure boundaries; a failing target never stops
//! its siblings or the next sweep.

use clap::Parser;
use std::error::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod extract;
mod feed;
mod models;
mod publish;
mod render;
mod scheduler;
mod wiki;

use cli::Cli;
use config::BotConfig;
use wiki::MwClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "frontpage_bot starting up");

    let args = Cli::parse();
    let config = match BotConfig::load(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config, error = %e, "Failed to load configuration");
            return Err(e);
        }
    };

    let client = match MwClient::login(
        &config.api_url,
        &config.username,
        &config.password,
        &config.user_agent,
    )
    .await
    {
        Ok(client) => client,
        Err(e) => {
            error!(api_url = %config.api_url, error = %e, "Login failed");
            return Err(e);
        }
    };

    // One-time listing setup; the per-cycle hot path only purges and parses.
    // A failure here is survivable when the block is already in place.
    for target in &config.targets {
        if let Err(e) =
            feed::ensure_listing(&client, &target.feed_listing_page, config.article_count).await
        {
            warn!(
                feed = %target.feed_listing_page,
                error = %e,
                "Could not (re)write feed listing block; relying on existing page content"
            );
        }
    }

    info!(
        targets = config.targets.len(),
        period_secs = config.period_secs,
        "Entering scheduler loop"
    );
    scheduler::run(&client, &config).await
}
