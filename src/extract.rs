//! Field extraction from raw article wikitext.
//!
//! Articles on the wiki carry their metadata inline: a `{{data|…}}` template
//! for the publication date, a portal marker template for the topical
//! category, a bolded first sentence as the lead, and (optionally) an image
//! declared either as a bare infobox parameter or as an inline file embed.
//!
//! Each extractor is a pure function over the raw markup. A pattern that
//! finds nothing yields the empty string; that is a normal outcome, not an
//! error, and the four fields never depend on each other. Only the first
//! match of any pattern is used.

use crate::models::ExtractedFields;
use once_cell::sync::Lazy;
use regex::Regex;

/// Portal marker templates recognized on the wiki. The set is closed; a new
/// portal means a new release of the bot.
static PORTAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\{\{(Gospodarka|Katastrofy|Kultura|Nauka|Polityka|Prawo i przestępczość|Sport|Społeczeństwo|Technika)",
    )
    .unwrap()
});

/// `{{data|<value>}}`, value captured up to the closing braces.
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\{\{data\|(.*?)\}\}").unwrap());

/// Bare pipe-delimited parameter value ending in an image extension. The
/// character class keeps the match from crossing parameter names (`=`),
/// other parameters (`|`), link syntax (`[`/`]`), or line breaks.
static IMAGE_PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\|([^|=\[\]\n]*\.(?:JPG|PNG|JPEG|WEBP|GIF|TIF|TIFF|BMP|SVG))").unwrap()
});

/// Inline file embed, `[[Plik:<name>.<ext>`.
static IMAGE_EMBED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\[Plik:(.*\.(?:JPG|PNG|JPEG|WEBP|GIF|TIF|TIFF|BMP|SVG))").unwrap()
});

/// Bolded run; editorial convention bolds the lead sentence.
static LEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'''(.*?)'''").unwrap());

/// Extract the portal/category name from the first recognized portal marker
/// template, first character upper-cased. `""` when the article carries none.
pub fn extract_portal(text: &str) -> String {
    match PORTAL_RE.captures(text) {
        Some(caps) => upcase(&caps[1]),
        None => String::new(),
    }
}

/// Extract the publication date token from the first `{{data|…}}` invocation,
/// verbatim. `""` when absent.
pub fn extract_date(text: &str) -> String {
    match DATE_RE.captures(text) {
        Some(caps) => caps[1].to_string(),
        None => String::new(),
    }
}

/// Extract the illustrative image filename.
///
/// Two conventions are observed in the wild and both must be tried: an
/// infobox declares the image as a bare pipe parameter, or the body embeds
/// it inline as `[[Plik:…]]`. The explicit parameter takes precedence; the
/// embed is only consulted when no parameter matches.
pub fn extract_image(text: &str) -> String {
    if let Some(caps) = IMAGE_PARAM_RE.captures(text) {
        return caps[1].to_string();
    }
    match IMAGE_EMBED_RE.captures(text) {
        Some(caps) => caps[1].to_string(),
        None => String::new(),
    }
}

/// Extract the lead sentence: the inner content of the first bolded run,
/// minimal match. `""` when the article has no bold text.
pub fn extract_lead(text: &str) -> String {
    match LEAD_RE.captures(text) {
        Some(caps) => caps[1].to_string(),
        None => String::new(),
    }
}

/// Run all four extractors over one article body.
pub fn extract_all(text: &str) -> ExtractedFields {
    ExtractedFields {
        date: extract_date(text),
        lead: extract_lead(text),
        image: extract_image(text),
        portal: extract_portal(text),
    }
}

/// Capitalize the first character of a string.
fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_absent() {
        assert_eq!(extract_portal("Some article with {{data|2024-01-02}} only."), "");
        assert_eq!(extract_portal(""), "");
    }

    #[test]
    fn test_portal_case_insensitive_and_capitalized() {
        assert_eq!(extract_portal("tekst {{sport}} tekst"), "Sport");
        assert_eq!(extract_portal("{{polityka|x}}"), "Polityka");
        assert_eq!(extract_portal("{{Prawo i przestępczość}}"), "Prawo i przestępczość");
    }

    #[test]
    fn test_portal_first_occurrence_wins() {
        assert_eq!(extract_portal("{{Kultura}} potem {{Sport}}"), "Kultura");
    }

    #[test]
    fn test_portal_requires_template_opener() {
        // The word alone, outside a template, is not a portal marker.
        assert_eq!(extract_portal("Sport to zdrowie."), "");
    }

    #[test]
    fn test_date_verbatim() {
        assert_eq!(extract_date("{{data|2024-01-02}}"), "2024-01-02");
        assert_eq!(extract_date("przed {{Data|2023-12-31}} po"), "2023-12-31");
    }

    #[test]
    fn test_date_arbitrary_value() {
        assert_eq!(extract_date("{{data|jutro rano}}"), "jutro rano");
    }

    #[test]
    fn test_date_absent() {
        assert_eq!(extract_date("brak daty"), "");
    }

    #[test]
    fn test_image_pipe_parameter() {
        assert_eq!(extract_image("|cat.png"), "cat.png");
        assert_eq!(extract_image("coś |obrazek 2.JPG dalej"), "obrazek 2.JPG");
    }

    #[test]
    fn test_image_parameter_beats_inline_embed() {
        let text = "|infobox.webp oraz [[Plik:inline.png]]";
        assert_eq!(extract_image(text), "infobox.webp");
    }

    #[test]
    fn test_image_inline_embed_fallback() {
        assert_eq!(extract_image("tekst [[Plik:Zamek.jpg|thumb]]"), "Zamek.jpg");
    }

    #[test]
    fn test_image_absent() {
        assert_eq!(extract_image("artykuł bez ilustracji"), "");
    }

    #[test]
    fn test_image_does_not_cross_parameter_names() {
        // "|zdjęcie=cat.png" is a named parameter; the bare-value pattern
        // must not swallow the name and the equals sign.
        assert_eq!(extract_image("|zdjęcie=cat.png"), "");
    }

    #[test]
    fn test_lead_minimal_match() {
        assert_eq!(extract_lead("'''Pierwsze zdanie.''' reszta '''pogrubienie'''"), "Pierwsze zdanie.");
    }

    #[test]
    fn test_lead_absent() {
        assert_eq!(extract_lead("tekst bez pogrubienia"), "");
    }

    #[test]
    fn test_extract_all_combined_fixture() {
        let raw = "{{data|2024-01-02}} '''Lead text.''' {{Sport}} |zdjęcie=cat.png";
        let fields = extract_all(raw);
        assert_eq!(fields.date, "2024-01-02");
        assert_eq!(fields.lead, "Lead text.");
        assert_eq!(fields.portal, "Sport");
        // Named parameter, so the image pattern correctly finds nothing.
        assert_eq!(fields.image, "");
    }

    #[test]
    fn test_extract_all_fields_independent() {
        let fields = extract_all("'''Tylko lead.'''");
        assert_eq!(fields.lead, "Tylko lead.");
        assert_eq!(fields.date, "");
        assert_eq!(fields.image, "");
        assert_eq!(fields.portal, "");
    }

    #[test]
    fn test_upcase() {
        assert_eq!(upcase("sport"), "Sport");
        assert_eq!(upcase("Sport"), "Sport");
        assert_eq!(upcase(""), "");
        assert_eq!(upcase("świat"), "Świat");
    }
}
