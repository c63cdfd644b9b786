use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The query was missing or empty. The only error surfaced before any
    /// adapter runs.
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GNews API error: {0}")]
    Gnews(String),

    #[error("Wikipedia API error: {0}")]
    Wikipedia(String),

    #[error("Reddit API error: {0}")]
    Reddit(String),

    #[error("embedding error: {0}")]
    Embed(String),
}
