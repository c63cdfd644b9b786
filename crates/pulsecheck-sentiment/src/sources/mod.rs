//! Source adapters and the concurrent fan-out over them.

mod gnews;
mod reddit;
mod reddit_filter;
mod wiki;

pub(crate) use gnews::GnewsClient;
pub(crate) use wiki::WikiClient;

use reddit::RedditClient;

use crate::error::AnalysisError;
use crate::types::{AnalyzerConfig, RawItem, Source};

/// What one adapter produced for this run: its items, or the failure that
/// was absorbed at the adapter boundary.
pub(crate) struct SourceOutcome {
    pub(crate) source: Source,
    pub(crate) result: Result<Vec<RawItem>, AnalysisError>,
}

/// Fan out to all three adapters concurrently.
///
/// Each branch settles independently; a failed adapter never aborts its
/// siblings. Outcomes are returned in fixed (news, encyclopedia, discussion)
/// order — the relevance sort reorders items later anyway.
pub(crate) async fn collect_all(
    gnews: &GnewsClient,
    wiki: &WikiClient,
    config: &AnalyzerConfig,
    query: &str,
) -> Vec<SourceOutcome> {
    let (gnews_result, wiki_result, reddit_result) = tokio::join!(
        gnews.search(query),
        wiki.search(query),
        search_reddit(config, query),
    );

    vec![
        SourceOutcome {
            source: Source::Gnews,
            result: gnews_result,
        },
        SourceOutcome {
            source: Source::Wikipedia,
            result: wiki_result,
        },
        SourceOutcome {
            source: Source::Reddit,
            result: reddit_result,
        },
    ]
}

/// Token exchange + search as one branch, so an auth failure surfaces as the
/// discussion adapter's failure.
async fn search_reddit(
    config: &AnalyzerConfig,
    query: &str,
) -> Result<Vec<RawItem>, AnalysisError> {
    let client = RedditClient::new(config).await?;
    client.search(query).await
}
