//! Wikipedia (MediaWiki API) search + intro-extract adapter.

use std::collections::HashMap;

use futures::future::try_join_all;
use serde::Deserialize;

use crate::error::AnalysisError;
use crate::types::{RawItem, Source};

/// Number of search hits fetched per query; each hit costs one extra
/// extract lookup.
const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    pageid: u64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    extract: Option<String>,
}

/// MediaWiki `api.php` client.
pub(crate) struct WikiClient {
    client: reqwest::Client,
    api_url: String,
}

impl WikiClient {
    #[must_use]
    pub(crate) fn new(api_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.to_string(),
        }
    }

    /// Search for pages matching the query, then fetch a plain-text intro
    /// extract for each of the top [`SEARCH_LIMIT`] hits.
    ///
    /// The extract lookups run concurrently and preserve search-hit order.
    /// `body` falls back to the page title when the extract is empty or
    /// missing. A failed extract lookup fails the whole adapter.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Wikipedia`] on a non-2xx status or an
    /// unparsable body, [`AnalysisError::Http`] on network failure.
    pub(crate) async fn search(&self, query: &str) -> Result<Vec<RawItem>, AnalysisError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
                ("utf8", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Wikipedia(format!(
                "search failed with status {}",
                response.status()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Wikipedia(format!("search parse error: {e}")))?;

        let lookups = parsed
            .query
            .search
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|hit| self.page_item(hit));

        try_join_all(lookups).await
    }

    /// Fetch the intro extract for one search hit and build its item.
    async fn page_item(&self, hit: SearchHit) -> Result<RawItem, AnalysisError> {
        let pageid = hit.pageid.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "true"),
                ("explaintext", "true"),
                ("pageids", pageid.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Wikipedia(format!(
                "extract lookup failed with status {}",
                response.status()
            )));
        }

        let parsed: ExtractResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Wikipedia(format!("extract parse error: {e}")))?;

        let extract = parsed
            .query
            .pages
            .get(&pageid)
            .and_then(|page| page.extract.clone())
            .filter(|extract| !extract.trim().is_empty());

        Ok(RawItem {
            source: Source::Wikipedia,
            body: Some(extract.unwrap_or_else(|| hit.title.clone())),
            title: hit.title,
            url: None,
        })
    }
}
