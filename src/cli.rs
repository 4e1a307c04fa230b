//! Command-line interface for the front-page bot.
//!
//! The bot is a daemon with no runtime flags beyond where to find its
//! configuration; everything else (credentials, targets, period) lives in
//! the config file.

use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// frontpage_bot --config /etc/frontpage_bot/config.yaml
/// BOT_CONFIG=./config.yaml frontpage_bot
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "BOT_CONFIG", default_value = "config.yaml")]
    pub config: String,
}
