//! Sneak-peek template rendering.
//!
//! A sneak peek is one `{{Strona główna/Wycinek artykułu}}` invocation with
//! six named parameters in a fixed order. Whatever the extractor produced is
//! rendered verbatim; empty fields simply become empty parameter values.
//!
//! The `duży` ("large") parameter is deliberately left as the unevaluated
//! placeholder `{{{duży|}}}`: whether a given front-page slot is the featured
//! large one is decided by the page that embeds the generated template, not
//! by the bot.

use crate::models::ExtractedFields;

/// Render the sneak-peek template for one article.
///
/// Pure: the same title and fields always produce byte-identical output,
/// which is what makes re-running a publish cycle idempotent.
pub fn render(title: &str, fields: &ExtractedFields) -> String {
    format!(
        "{{{{Strona główna/Wycinek artykułu\n\
         |tytuł={title}\n\
         |data={date}\n\
         |treść={lead}\n\
         |obrazek={image}\n\
         |portal={portal}\n\
         |duży={{{{{{duży|}}}}}}\n\
         }}}}",
        title = title,
        date = fields.date,
        lead = fields.lead,
        image = fields.image,
        portal = fields.portal,
    )
}
