//! Wikipedia extract provider.
//!
//! Uses the MediaWiki query API with `prop=extracts&explaintext=1&redirects=1`
//! to get a plain-text extract of the best-matching article.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TimelineError};
use crate::traits::extract::{Extract, ExtractProvider};

const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const PROVIDER: &str = "wikipedia";

/// Wikipedia-backed extract provider.
#[derive(Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: QueryBlock,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    /// Present (usually as `""`) when the title doesn't exist
    #[serde(default)]
    missing: Option<serde_json::Value>,
    #[serde(default)]
    extract: Option<String>,
}

impl WikipediaClient {
    /// Create a client against English Wikipedia.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("timeline/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TimelineError::Config(Box::new(e)))?;

        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Point at a different MediaWiki `api.php` (other languages, proxies, tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl ExtractProvider for WikipediaClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_extract(&self, query: &str) -> Result<Extract> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("format", "json"),
                ("action", "query"),
                ("prop", "extracts"),
                ("titles", query),
                ("explaintext", "1"),
                ("redirects", "1"),
            ])
            .send()
            .await
            .map_err(|e| TimelineError::provider(PROVIDER, e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(TimelineError::provider(
                PROVIDER,
                format!("API error {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TimelineError::provider(PROVIDER, e))?;

        let extract = parse_extract_response(query, &body)?;
        debug!(query, missing = extract.missing, len = extract.text.len(), "Fetched extract");
        Ok(extract)
    }
}

/// Interpret a MediaWiki `action=query` response body.
fn parse_extract_response(query: &str, body: &str) -> Result<Extract> {
    let parsed: QueryResponse =
        serde_json::from_str(body).map_err(|e| TimelineError::provider(PROVIDER, e))?;

    let page = first_page(parsed.query.pages).ok_or_else(|| {
        TimelineError::provider(PROVIDER, "response contained no pages")
    })?;

    if page.missing.is_some() {
        return Ok(Extract::missing(format!(
            "No exact match found on Wikipedia for \"{}\".",
            query
        )));
    }

    match page.extract {
        Some(text) if !text.is_empty() => Ok(Extract::found(text)),
        _ => Ok(Extract::found(format!(
            "No extract available from Wikipedia for \"{}\".",
            query
        ))),
    }
}

/// The page MediaWiki lists first.
///
/// Existing pages are keyed by page id and come before the negative
/// placeholder keys of missing titles, lowest id first.
fn first_page(mut pages: BTreeMap<String, Page>) -> Option<Page> {
    let lowest_id = pages
        .keys()
        .filter_map(|key| key.parse::<u64>().ok().map(|id| (id, key)))
        .min_by_key(|(id, _)| *id)
        .map(|(_, key)| key.clone());

    match lowest_id {
        Some(key) => pages.remove(&key),
        None => pages.into_values().next(),
    }
}
