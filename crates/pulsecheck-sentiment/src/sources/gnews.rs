//! GNews article search adapter.

use serde::Deserialize;

use crate::error::AnalysisError;
use crate::types::{RawItem, Source};

/// Maximum articles requested per query.
const MAX_ARTICLES: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

/// GNews REST client.
pub(crate) struct GnewsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GnewsClient {
    #[must_use]
    pub(crate) fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search English-language news for the query.
    ///
    /// Returns up to [`MAX_ARTICLES`] title-only items; articles without a
    /// usable title are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Gnews`] on a non-2xx status or an unparsable
    /// body, [`AnalysisError::Http`] on network failure.
    pub(crate) async fn search(&self, query: &str) -> Result<Vec<RawItem>, AnalysisError> {
        let url = format!("{}/search", self.base_url);
        let max = MAX_ARTICLES.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("lang", "en"),
                ("max", max.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Gnews(format!(
                "search failed with status {}",
                response.status()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Gnews(format!("response parse error: {e}")))?;

        let items = parsed
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title?;
                if title.trim().is_empty() {
                    return None;
                }
                Some(RawItem {
                    source: Source::Gnews,
                    title,
                    body: None,
                    url: None,
                })
            })
            .take(MAX_ARTICLES)
            .collect();

        Ok(items)
    }
}
