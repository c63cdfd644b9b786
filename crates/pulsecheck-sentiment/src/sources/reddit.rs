//! Reddit search adapter (client-credentials OAuth).

use serde::Deserialize;

use crate::error::AnalysisError;
use crate::types::{AnalyzerConfig, RawItem};

use super::reddit_filter::{admit, to_item};

/// Raw posts requested from the search endpoint before filtering.
const FETCH_LIMIT: usize = 50;
/// Posts kept after the admission filter.
const KEEP_LIMIT: usize = 10;

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Post {
    pub(super) data: PostData,
}

#[derive(Debug, Deserialize)]
pub(super) struct PostData {
    pub(super) title: Option<String>,
    pub(super) permalink: Option<String>,
    pub(super) subreddit: Option<String>,
    pub(super) upvote_ratio: Option<f32>,
}

/// Reddit API client with a valid access token.
pub(crate) struct RedditClient {
    client: reqwest::Client,
    api_base_url: String,
    token: String,
    user_agent: String,
}

impl RedditClient {
    /// Create a new `RedditClient` by exchanging client credentials for a
    /// token. Token acquisition failure is adapter failure.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Reddit`] if the token exchange fails.
    pub(crate) async fn new(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AnalysisError::Reddit(format!("failed to build HTTP client: {e}")))?;
        let token = Self::fetch_token(&client, config).await?;

        Ok(Self {
            client,
            api_base_url: config.reddit_api_base_url.trim_end_matches('/').to_string(),
            token,
            user_agent: config.reddit_user_agent.clone(),
        })
    }

    async fn fetch_token(
        client: &reqwest::Client,
        config: &AnalyzerConfig,
    ) -> Result<String, AnalysisError> {
        let url = format!(
            "{}/api/v1/access_token",
            config.reddit_auth_base_url.trim_end_matches('/')
        );
        let response = client
            .post(&url)
            .header("User-Agent", &config.reddit_user_agent)
            .basic_auth(&config.reddit_client_id, Some(&config.reddit_client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Reddit(format!("token parse error: {e}")))?;

        Ok(token_resp.access_token)
    }

    /// Search recent posts for the query.
    ///
    /// Pulls up to [`FETCH_LIMIT`] raw posts sorted by relevance over the
    /// last month, applies the admission filter, and keeps the first
    /// [`KEEP_LIMIT`] survivors.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Reddit`] if the search request fails or the
    /// response cannot be parsed.
    pub(crate) async fn search(&self, query: &str) -> Result<Vec<RawItem>, AnalysisError> {
        let url = format!("{}/search", self.api_base_url);
        let limit = FETCH_LIMIT.to_string();
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", &self.user_agent)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("sort", "relevance"),
                ("t", "month"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Reddit(format!(
                "search failed with status {}",
                response.status()
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| AnalysisError::Reddit(format!("response parse error: {e}")))?;

        let items = listing
            .data
            .children
            .iter()
            .filter(|post| admit(&post.data))
            .take(KEEP_LIMIT)
            .filter_map(|post| to_item(&post.data))
            .collect();

        Ok(items)
    }
}
