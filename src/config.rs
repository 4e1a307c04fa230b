//! Bot configuration loaded once at startup.
//!
//! The configuration is a single YAML file holding the API endpoint, the bot
//! account credentials, the sweep period, the feed result-count limit, and
//! the ordered list of front-page targets. It is deserialized once in `main`
//! and passed by reference into the scheduler; nothing in the process mutates
//! it afterwards.
//!
//! # Example
//!
//! ```yaml
//! api_url: "https://pl.wikinews.org/w/api.php"
//! username: "PastooshekBOT@frontpage"
//! password: "..."
//! user_agent: "frontpage_bot/0.2 (pl.wikinews; operator contact on user page)"
//! period_secs: 1200
//! article_count: 5
//! targets:
//!   - page_to_purge: "Strona główna"
//!     template_prefix: "Szablon:Strona główna/Artykuł "
//!     feed_listing_page: "Wikireporter:PastooshekBOT/Najnowsze"
//! ```

use crate::models::TargetConfig;
use serde::Deserialize;
use std::error::Error;
use tracing::info;
use url::Url;

/// Default sweep period: twenty minutes.
fn default_period_secs() -> u64 {
    20 * 60
}

/// Default number of articles the feed listing is asked for.
fn default_article_count() -> u32 {
    5
}

/// Everything the bot needs to run, as found in the YAML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Action API endpoint, e.g. `https://pl.wikinews.org/w/api.php`.
    pub api_url: String,
    /// Bot account name (a BotPassword-style `user@label` name works too).
    pub username: String,
    /// Bot account password.
    pub password: String,
    /// User-agent string required by the remote service's usage policy.
    pub user_agent: String,
    /// Seconds between full sweeps over all targets.
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
    /// Result-count limit written into the feed listing block.
    #[serde(default = "default_article_count")]
    pub article_count: u32,
    /// Front-page targets, updated in declared order every sweep.
    pub targets: Vec<TargetConfig>,
}

impl BotConfig {
    /// Load and validate a configuration file.
    ///
    /// Validation is intentionally shallow: the API URL must parse and at
    /// least one target must be declared. Credentials are only proven valid
    /// by the login call at startup.
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = tokio::fs::read_to_string(path).await?;
        let config: BotConfig = serde_yaml::from_str(&raw)?;

        Url::parse(&config.api_url)?;
        if config.targets.is_empty() {
            return Err(format!("config {path} declares no targets").into());
        }
        if config.period_secs == 0 {
            return Err(format!("config {path} has period_secs = 0").into());
        }

        info!(
            path,
            targets = config.targets.len(),
            period_secs = config.period_secs,
            article_count = config.article_count,
            "Loaded configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
api_url: "https://pl.wikinews.org/w/api.php"
username: "bot"
password: "secret"
user_agent: "frontpage_bot/test"
period_secs: 600
article_count: 7
targets:
  - page_to_purge: "Strona główna"
    template_prefix: "Szablon:Strona główna/Artykuł "
    feed_listing_page: "Wikireporter:PastooshekBOT/Najnowsze"
"#;

    #[test]
    fn test_full_config_parses() {
        let config: BotConfig = serde_yaml::from_str(FULL).unwrap();
        assert_eq!(config.period_secs, 600);
        assert_eq!(config.article_count, 7);
        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.targets[0].page_to_purge, "Strona główna");
    }

    #[test]
    fn test_period_and_count_default() {
        let yaml = r#"
api_url: "https://pl.wikinews.org/w/api.php"
username: "bot"
password: "secret"
user_agent: "frontpage_bot/test"
targets:
  - page_to_purge: "Main"
    template_prefix: "Tmpl "
    feed_listing_page: "Feed"
"#;
        let config: BotConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.period_secs, 1200);
        assert_eq!(config.article_count, 5);
    }

    #[tokio::test]
    async fn test_load_rejects_empty_targets() {
        let yaml = r#"
api_url: "https://pl.wikinews.org/w/api.php"
username: "bot"
password: "secret"
user_agent: "frontpage_bot/test"
targets: []
"#;
        let dir = std::env::temp_dir();
        let path = dir.join("frontpage_bot_empty_targets.yaml");
        tokio::fs::write(&path, yaml).await.unwrap();
        let result = BotConfig::load(path.to_str().unwrap()).await;
        assert!(result.is_err());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_load_rejects_bad_url() {
        let yaml = r#"
api_url: "not a url"
username: "bot"
password: "secret"
user_agent: "frontpage_bot/test"
targets:
  - page_to_purge: "Main"
    template_prefix: "Tmpl "
    feed_listing_page: "Feed"
"#;
        let dir = std::env::temp_dir();
        let path = dir.join("frontpage_bot_bad_url.yaml");
        tokio::fs::write(&path, yaml).await.unwrap();
        let result = BotConfig::load(path.to_str().unwrap()).await;
        assert!(result.is_err());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
