//! MediaWiki Action API client.
//!
//! The rest of the bot talks to the wiki only through the [`WikiClient`]
//! trait: four capability operations (purge, parse, read, write) with no
//! transport details attached. [`MwClient`] is the production implementation
//! over the Action API; tests substitute scripted in-memory clients.
//!
//! # Session
//!
//! [`MwClient::login`] performs the bot login handshake (login token →
//! `action=login` → CSRF token) and keeps the session cookie jar plus the
//! CSRF token for the lifetime of the process. Every call carries
//! `assert=user` so a silently-expired session fails loudly instead of
//! editing logged out.

use serde::Deserialize;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Abstract repository operations the bot consumes.
///
/// `purge` is idempotent; `write_source` overwrites the page body wholesale,
/// recorded with a human-readable summary. There is no optimistic-concurrency
/// token: a write can overwrite a concurrent human edit, an accepted risk of
/// this bot's domain.
pub trait WikiClient {
    /// Invalidate the cached rendered form of a page.
    async fn purge(&self, title: &str) -> Result<(), Box<dyn Error>>;

    /// Return the fully rendered (HTML) output of a page.
    async fn parse_rendered(&self, title: &str) -> Result<String, Box<dyn Error>>;

    /// Return the latest revision's raw wikitext.
    async fn read_source(&self, title: &str) -> Result<String, Box<dyn Error>>;

    /// Overwrite a page's body.
    async fn write_source(
        &self,
        title: &str,
        content: &str,
        summary: &str,
    ) -> Result<(), Box<dyn Error>>;
}

/// API-level error object, present in otherwise-successful HTTP responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

impl ApiError {
    fn boxed(self, action: &str) -> Box<dyn Error> {
        format!("API error during {action}: {} ({})", self.info, self.code).into()
    }
}

#[derive(Debug, Deserialize)]
struct Tokens {
    logintoken: Option<String>,
    csrftoken: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    tokens: Tokens,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    error: Option<ApiError>,
    query: Option<TokenQuery>,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    result: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    error: Option<ApiError>,
    login: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
struct ParsePayload {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    error: Option<ApiError>,
    parse: Option<ParsePayload>,
}

#[derive(Debug, Deserialize)]
struct Slot {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Slots {
    main: Slot,
}

#[derive(Debug, Deserialize)]
struct Revision {
    slots: Slots,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: Option<String>,
    #[serde(default)]
    missing: bool,
    revisions: Option<Vec<Revision>>,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct RevisionsResponse {
    error: Option<ApiError>,
    query: Option<PagesQuery>,
}

#[derive(Debug, Deserialize)]
struct EditResult {
    result: String,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    error: Option<ApiError>,
    edit: Option<EditResult>,
}

/// Production [`WikiClient`] over the MediaWiki Action API.
pub struct MwClient {
    http: reqwest::Client,
    api_url: Url,
    csrf_token: String,
}

impl std::fmt::Debug for MwClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MwClient")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

impl MwClient {
    /// Log in as the bot account and cache the session.
    ///
    /// Performs the full handshake: fetch a login token, `action=login` with
    /// the bot credentials, then fetch and cache the CSRF token used by all
    /// subsequent edits.
    #[instrument(level = "info", skip_all, fields(api_url = %api_url))]
    pub async fn login(
        api_url: &str,
        username: &str,
        password: &str,
        user_agent: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let t0 = Instant::now();
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;
        let api_url = Url::parse(api_url)?;

        let login_token = fetch_token(&http, &api_url, "login").await?;

        let response: LoginResponse = http
            .post(api_url.clone())
            .form(&[
                ("action", "login"),
                ("lgname", username),
                ("lgpassword", password),
                ("lgtoken", login_token.as_str()),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(e) = response.error {
            return Err(e.boxed("login"));
        }
        let login = response
            .login
            .ok_or("login response carried no login payload")?;
        if login.result != "Success" {
            let reason = login.reason.unwrap_or_default();
            return Err(format!("login rejected: {} {reason}", login.result).into());
        }

        let csrf_token = fetch_token(&http, &api_url, "csrf").await?;
        info!(
            username,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Logged in to the wiki"
        );

        Ok(Self {
            http,
            api_url,
            csrf_token,
        })
    }
}

/// Fetch a token of the given type (`login` or `csrf`).
async fn fetch_token(
    http: &reqwest::Client,
    api_url: &Url,
    kind: &str,
) -> Result<String, Box<dyn Error>> {
    let response: TokenResponse = http
        .get(api_url.clone())
        .query(&[
            ("action", "query"),
            ("meta", "tokens"),
            ("type", kind),
            ("format", "json"),
            ("formatversion", "2"),
        ])
        .send()
        .await?
        .json()
        .await?;

    if let Some(e) = response.error {
        return Err(e.boxed("token fetch"));
    }
    let tokens = response
        .query
        .ok_or("token response carried no query payload")?
        .tokens;
    let token = match kind {
        "login" => tokens.logintoken,
        _ => tokens.csrftoken,
    };
    token.ok_or_else(|| format!("no {kind} token in response").into())
}

impl WikiClient for MwClient {
    #[instrument(level = "debug", skip(self))]
    async fn purge(&self, title: &str) -> Result<(), Box<dyn Error>> {
        let body = self
            .http
            .post(self.api_url.clone())
            .form(&[
                ("action", "purge"),
                ("titles", title),
                ("format", "json"),
                ("formatversion", "2"),
                ("assert", "user"),
            ])
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        if let Some(e) = body.get("error") {
            return Err(format!("API error during purge of {title}: {e}").into());
        }
        debug!(title, "Purged page cache");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn parse_rendered(&self, title: &str) -> Result<String, Box<dyn Error>> {
        let response: ParseResponse = self
            .http
            .get(self.api_url.clone())
            .query(&[
                ("action", "parse"),
                ("page", title),
                ("prop", "text"),
                ("format", "json"),
                ("formatversion", "2"),
                ("assert", "user"),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(e) = response.error {
            return Err(e.boxed("parse"));
        }
        let parse = response
            .parse
            .ok_or_else(|| format!("parse response for {title} carried no payload"))?;
        debug!(title, bytes = parse.text.len(), "Parsed rendered page");
        Ok(parse.text)
    }

    #[instrument(level = "debug", skip(self))]
    async fn read_source(&self, title: &str) -> Result<String, Box<dyn Error>> {
        let response: RevisionsResponse = self
            .http
            .get(self.api_url.clone())
            .query(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("rvslots", "main"),
                ("titles", title),
                ("format", "json"),
                ("formatversion", "2"),
                ("assert", "user"),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(e) = response.error {
            return Err(e.boxed("read"));
        }
        let pages = response
            .query
            .ok_or_else(|| format!("revisions response for {title} carried no query payload"))?
            .pages;
        let page = pages
            .into_iter()
            .next()
            .ok_or_else(|| format!("revisions response for {title} carried no pages"))?;
        if page.missing {
            return Err(format!(
                "page {} does not exist",
                page.title.as_deref().unwrap_or(title)
            )
            .into());
        }
        let content = page
            .revisions
            .and_then(|mut revs| if revs.is_empty() { None } else { Some(revs.remove(0)) })
            .map(|rev| rev.slots.main.content)
            .ok_or_else(|| format!("page {title} has no readable revision"))?;
        debug!(title, bytes = content.len(), "Read page source");
        Ok(content)
    }

    #[instrument(level = "debug", skip(self, content))]
    async fn write_source(
        &self,
        title: &str,
        content: &str,
        summary: &str,
    ) -> Result<(), Box<dyn Error>> {
        let response: EditResponse = self
            .http
            .post(self.api_url.clone())
            .form(&[
                ("action", "edit"),
                ("title", title),
                ("text", content),
                ("summary", summary),
                ("bot", "1"),
                ("token", self.csrf_token.as_str()),
                ("format", "json"),
                ("formatversion", "2"),
                ("assert", "user"),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(e) = response.error {
            return Err(e.boxed("edit"));
        }
        let edit = response
            .edit
            .ok_or_else(|| format!("edit response for {title} carried no payload"))?;
        if edit.result != "Success" {
            warn!(title, result = %edit.result, "Edit not accepted");
            return Err(format!("edit of {title} rejected: {}", edit.result).into());
        }
        debug!(title, bytes = content.len(), "Wrote page source");
        Ok(())
    }
}
