//! Encyclopedia lookups against a MediaWiki `api.php` endpoint.
//!
//! Response parsing is always available; the blocking HTTP client needs the
//! `encyclopedia` feature.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{DrafyError, Result};

/// Number of search hits requested per query.
pub const SEARCH_LIMIT: u32 = 5;

/// Text returned by [`parse_extract_response`] when the page has no extract.
pub const NO_EXTRACT_TEXT: &str = "No information available";

/// One hit from a term search.
///
/// Reads the API's `pageid` key; serializes it as `pageId` like the other
/// camelCase types in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(alias = "pageid")]
    pub page_id: i64,
    pub title: String,
    /// HTML fragment with `<span class="searchmatch">` highlights.
    pub snippet: String,
}

impl SearchResult {
    /// The snippet with markup removed and common entities decoded.
    pub fn snippet_text(&self) -> String {
        strip_markup(&self.snippet)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, PageContent>,
}

#[derive(Deserialize)]
struct PageContent {
    #[serde(default)]
    extract: Option<String>,
}

/// Parses a `list=search` response body.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| DrafyError::Encyclopedia(format!("unexpected search response: {e}")))?;
    Ok(response.query.search)
}

/// Parses a `prop=extracts` response body into the first page's plain text.
pub fn parse_extract_response(body: &str) -> Result<String> {
    let response: ExtractResponse = serde_json::from_str(body)
        .map_err(|e| DrafyError::Encyclopedia(format!("unexpected extract response: {e}")))?;
    let extract = response
        .query
        .pages
        .into_values()
        .find_map(|page| page.extract.filter(|text| !text.trim().is_empty()));
    Ok(extract.unwrap_or_else(|| NO_EXTRACT_TEXT.to_string()))
}

fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(feature = "encyclopedia")]
pub use client::EncyclopediaClient;

#[cfg(feature = "encyclopedia")]
mod client {
    use super::{parse_extract_response, parse_search_response, SearchResult, SEARCH_LIMIT};
    use crate::{AppSettings, DrafyError, Result};
    use std::time::Duration;

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// Blocking client for term search and intro extracts. Never retries.
    pub struct EncyclopediaClient {
        http: reqwest::blocking::Client,
        endpoint: String,
    }

    impl EncyclopediaClient {
        /// Creates a client for the wiki at `base_url` (e.g. `https://en.wikipedia.org/w/`).
        pub fn new(base_url: &str) -> Result<Self> {
            let http = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(http_error)?;
            let endpoint = format!("{}/api.php", base_url.trim_end_matches('/'));
            Ok(Self { http, endpoint })
        }

        pub fn from_settings(settings: &AppSettings) -> Result<Self> {
            Self::new(&settings.encyclopedia_url)
        }

        /// Searches article titles and text for `term`.
        ///
        /// A blank term returns no results without a request.
        pub fn search_term(&self, term: &str) -> Result<Vec<SearchResult>> {
            let term = term.trim();
            if term.is_empty() {
                return Ok(Vec::new());
            }
            let limit = SEARCH_LIMIT.to_string();
            let body = self.get(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", term),
                ("srlimit", limit.as_str()),
            ])?;
            let results = parse_search_response(&body)?;
            log::debug!("encyclopedia search {term:?} returned {} hits", results.len());
            Ok(results)
        }

        /// Fetches the plain-text introduction of page `page_id`.
        pub fn page_extract(&self, page_id: i64) -> Result<String> {
            let page_id = page_id.to_string();
            let body = self.get(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("pageids", page_id.as_str()),
            ])?;
            parse_extract_response(&body)
        }

        fn get(&self, params: &[(&str, &str)]) -> Result<String> {
            self.http
                .get(&self.endpoint)
                .query(params)
                .send()
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(http_error)
        }
    }

    fn http_error(e: reqwest::Error) -> DrafyError {
        DrafyError::Encyclopedia(e.to_string())
    }
}
