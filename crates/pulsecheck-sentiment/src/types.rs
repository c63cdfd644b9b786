use serde::Serialize;

/// External source a result item was retrieved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    #[serde(rename = "GNews")]
    Gnews,
    Wikipedia,
    Reddit,
}

impl Source {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gnews => "GNews",
            Self::Wikipedia => "Wikipedia",
            Self::Reddit => "Reddit",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single item as produced by a source adapter, before classification
/// and ranking. Immutable once created.
#[derive(Debug, Clone)]
pub struct RawItem {
    pub source: Source,
    pub title: String,
    /// Longer text when the source provides one (Wikipedia intro extract).
    pub body: Option<String>,
    /// Link back to the original content, when one exists.
    pub url: Option<String>,
}

impl RawItem {
    /// Text the classifier should score: `body` when present and non-empty,
    /// otherwise `title`.
    #[must_use]
    pub fn sentiment_text(&self) -> &str {
        match self.body.as_deref() {
            Some(body) if !body.trim().is_empty() => body,
            _ => &self.title,
        }
    }

    /// Text the ranker embeds. Titles are short and dense; all sources rank
    /// on the title, falling back to the body only when the title is empty.
    #[must_use]
    pub fn ranking_text(&self) -> &str {
        if self.title.trim().is_empty() {
            self.body.as_deref().unwrap_or("")
        } else {
            &self.title
        }
    }
}

/// A [`RawItem`] annotated with its sentiment label and relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem {
    pub source: Source,
    pub title: String,
    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub sentiment: Sentiment,
    /// Cosine similarity against the query in `[-1.0, 1.0]`. `0.0` until the
    /// ranker runs, or when ranking was degraded.
    pub relevance: f32,
}

impl ScoredItem {
    /// Text the ranker embeds; same rule as [`RawItem::ranking_text`].
    #[must_use]
    pub fn ranking_text(&self) -> &str {
        if self.title.trim().is_empty() {
            self.body.as_deref().unwrap_or("")
        } else {
            &self.title
        }
    }

    pub(crate) fn new(item: RawItem, sentiment: Sentiment) -> Self {
        Self {
            source: item.source,
            title: item.title,
            body: item.body,
            url: item.url,
            sentiment,
            relevance: 0.0,
        }
    }
}

/// Per-label tally. Used for both absolute counts and rounded percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentCounts {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentCounts {
    pub(crate) fn bump(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }
}

/// Full result of one analysis run.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub query: String,
    /// Number of items in `results` after truncation. May be 0.
    pub total: u32,
    pub counts: SentimentCounts,
    /// `round(count / total * 100)` per label; rounded independently, so the
    /// three values need not sum to exactly 100.
    pub percentages: SentimentCounts,
    /// Items sorted by descending relevance (source order when degraded).
    pub results: Vec<ScoredItem>,
    /// Sources that failed this run and contributed zero items.
    pub failed_sources: Vec<Source>,
    /// True when the embedding step failed and `results` kept source order.
    pub ranking_degraded: bool,
}

/// Default GNews REST endpoint base.
const GNEWS_BASE_URL: &str = "https://gnews.io/api/v4";
/// Default English Wikipedia MediaWiki API endpoint.
const WIKI_API_URL: &str = "https://en.wikipedia.org/w/api.php";
/// Default Reddit token-exchange host.
const REDDIT_AUTH_BASE_URL: &str = "https://www.reddit.com";
/// Default Reddit OAuth API host.
const REDDIT_API_BASE_URL: &str = "https://oauth.reddit.com";

const DEFAULT_USER_AGENT: &str = "pulsecheck/0.1";

/// Configuration for the analysis pipeline.
///
/// Base URLs default to the production endpoints; tests point them at a
/// wiremock server instead.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub gnews_api_key: String,
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub tei_url: String,
    pub gnews_base_url: String,
    pub wiki_api_url: String,
    pub reddit_auth_base_url: String,
    pub reddit_api_base_url: String,
}

impl AnalyzerConfig {
    /// Build config from environment variables.
    ///
    /// Returns an error string listing any missing variables.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any required env var is not set.
    ///
    /// # Panics
    ///
    /// Does not panic: all `unwrap` calls are guarded by the `missing` check above.
    pub fn from_env() -> Result<Self, String> {
        let get = |key: &str| -> Option<String> { std::env::var(key).ok() };

        let gnews_api_key = get("GNEWS_API_KEY");
        let reddit_client_id = get("REDDIT_CLIENT_ID");
        let reddit_client_secret = get("REDDIT_CLIENT_SECRET");
        let tei_url = get("PULSECHECK_TEI_URL");

        let mut missing = Vec::new();
        if gnews_api_key.is_none() {
            missing.push("GNEWS_API_KEY");
        }
        if reddit_client_id.is_none() {
            missing.push("REDDIT_CLIENT_ID");
        }
        if reddit_client_secret.is_none() {
            missing.push("REDDIT_CLIENT_SECRET");
        }
        if tei_url.is_none() {
            missing.push("PULSECHECK_TEI_URL");
        }
        if !missing.is_empty() {
            return Err(format!("missing env vars: {}", missing.join(", ")));
        }

        Ok(Self {
            gnews_api_key: gnews_api_key.unwrap(),
            reddit_client_id: reddit_client_id.unwrap(),
            reddit_client_secret: reddit_client_secret.unwrap(),
            reddit_user_agent: get("REDDIT_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            tei_url: tei_url.unwrap(),
            gnews_base_url: get("GNEWS_BASE_URL").unwrap_or_else(|| GNEWS_BASE_URL.to_string()),
            wiki_api_url: get("WIKI_API_URL").unwrap_or_else(|| WIKI_API_URL.to_string()),
            reddit_auth_base_url: get("REDDIT_AUTH_BASE_URL")
                .unwrap_or_else(|| REDDIT_AUTH_BASE_URL.to_string()),
            reddit_api_base_url: get("REDDIT_API_BASE_URL")
                .unwrap_or_else(|| REDDIT_API_BASE_URL.to_string()),
        })
    }
}
