//! Data models for feed targets and extracted article metadata.
//!
//! This module defines the core data structures used throughout the bot:
//! - [`TargetConfig`]: one independently-updated front-page section
//! - [`ExtractedFields`]: the structured metadata pulled from an article body
//! - [`PublishJob`]: a target paired with the article titles it currently maps to
//!
//! All of these are ephemeral except `TargetConfig`, which is loaded from the
//! configuration file at startup and never mutated afterwards.

use serde::Deserialize;

/// One front-page section kept up to date by the bot.
///
/// A target ties together three page names:
/// - the feed listing page whose rendered output names the current articles,
/// - the subpage-name prefix the sneak peeks are written under, and
/// - the parent page whose render cache must be purged after an update.
///
/// The subpage for feed position `i` (0-based) is the prefix with `i + 1`
/// appended directly; the prefix carries its own trailing separator, e.g.
/// `"Szablon:Strona główna/Artykuł "` yields `Szablon:Strona główna/Artykuł 1`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TargetConfig {
    /// The front-page-like page to purge once all subpages are written.
    pub page_to_purge: String,
    /// Subpage-name prefix onto which the 1-based position number is appended.
    pub template_prefix: String,
    /// The dynamic listing page that names the current articles.
    pub feed_listing_page: String,
}

impl TargetConfig {
    /// Name of the subpage holding the sneak peek for feed position `index`
    /// (0-based).
    pub fn subpage(&self, index: usize) -> String {
        format!("{}{}", self.template_prefix, index + 1)
    }
}

/// Structured metadata extracted from one article's raw wikitext.
///
/// Every field defaults to the empty string when no matching pattern is found
/// in the article body; absence is a valid, silent outcome, not an error. The
/// four fields are derived independently of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Publication date token from the article's date template.
    pub date: String,
    /// The bolded lead sentence.
    pub lead: String,
    /// Illustrative image filename, if the body declares one.
    pub image: String,
    /// Topical portal/category name, first character upper-cased.
    pub portal: String,
}

/// The unit of work for one publish cycle of one target.
///
/// Created fresh every scheduling tick from the current feed contents and
/// discarded after the write/purge sequence finishes; the bot retains no
/// state between cycles.
#[derive(Debug)]
pub struct PublishJob {
    /// The target being updated.
    pub target: TargetConfig,
    /// Article titles in feed order (newest first, as the feed renders them).
    pub titles: Vec<String>,
}

impl PublishJob {
    pub fn new(target: TargetConfig, titles: Vec<String>) -> Self {
        Self { target, titles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> TargetConfig {
        TargetConfig {
            page_to_purge: "Strona główna".to_string(),
            template_prefix: "Szablon:Strona główna/Artykuł ".to_string(),
            feed_listing_page: "Wikireporter:PastooshekBOT/Najnowsze".to_string(),
        }
    }

    #[test]
    fn test_subpage_numbering_is_one_based() {
        let t = target();
        assert_eq!(t.subpage(0), "Szablon:Strona główna/Artykuł 1");
        assert_eq!(t.subpage(4), "Szablon:Strona główna/Artykuł 5");
    }

    #[test]
    fn test_subpage_prefix_owns_its_separator() {
        let t = TargetConfig {
            page_to_purge: "Main".to_string(),
            template_prefix: "Tmpl ".to_string(),
            feed_listing_page: "Feed".to_string(),
        };
        assert_eq!(t.subpage(0), "Tmpl 1");
    }

    #[test]
    fn test_extracted_fields_default_to_empty() {
        let fields = ExtractedFields::default();
        assert_eq!(fields.date, "");
        assert_eq!(fields.lead, "");
        assert_eq!(fields.image, "");
        assert_eq!(fields.portal, "");
    }

    #[test]
    fn test_target_config_deserialization() {
        let yaml = r#"
page_to_purge: "Strona główna"
template_prefix: "Szablon:Strona główna/Artykuł "
feed_listing_page: "Wikireporter:PastooshekBOT/Najnowsze"
"#;
        let t: TargetConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(t, target());
    }

    #[test]
    fn test_publish_job_holds_feed_order() {
        let job = PublishJob::new(target(), vec!["B".to_string(), "A".to_string()]);
        assert_eq!(job.titles, vec!["B", "A"]);
    }
}
