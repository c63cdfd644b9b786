//! Analysis pipeline orchestration.

use crate::classifier::classify;
use crate::embeddings::EmbedClient;
use crate::error::AnalysisError;
use crate::rank;
use crate::sources::{self, GnewsClient, WikiClient};
use crate::types::{AnalysisReport, AnalyzerConfig, ScoredItem, SentimentCounts};

/// Maximum number of items in the final result set.
const RESULT_CAP: usize = 50;

/// One-query sentiment analyzer.
///
/// Holds the HTTP clients for all collaborators, including the shared
/// embedding handle, so construction happens once per process and
/// [`Analyzer::analyze`] can run any number of queries against it.
pub struct Analyzer {
    config: AnalyzerConfig,
    gnews: GnewsClient,
    wiki: WikiClient,
    embedder: EmbedClient,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        let gnews = GnewsClient::new(&config.gnews_base_url, &config.gnews_api_key);
        let wiki = WikiClient::new(&config.wiki_api_url);
        let embedder = EmbedClient::new(&config.tei_url);
        Self {
            config,
            gnews,
            wiki,
            embedder,
        }
    }

    /// Run the full pipeline for one query.
    ///
    /// 1. Reject an empty query.
    /// 2. Fan out to GNews, Wikipedia, and Reddit concurrently; absorb
    ///    per-source failures.
    /// 3. Classify sentiment for every retrieved item.
    /// 4. Rank by embedding cosine similarity against the query; if the
    ///    embedding step fails, keep source order and flag the report as
    ///    degraded instead of aborting.
    /// 5. Truncate to [`RESULT_CAP`] and compute summary counts/percentages.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyQuery`] for a missing/blank query. All
    /// other collaborator failures degrade the result set instead of
    /// surfacing here.
    pub async fn analyze(&self, query: &str) -> Result<AnalysisReport, AnalysisError> {
        if query.trim().is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }

        let outcomes = sources::collect_all(&self.gnews, &self.wiki, &self.config, query).await;

        let mut failed_sources = Vec::new();
        let mut results: Vec<ScoredItem> = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(items) => {
                    tracing::debug!(
                        source = %outcome.source,
                        count = items.len(),
                        "collected items"
                    );
                    results.extend(items.into_iter().map(|item| {
                        let sentiment = classify(item.sentiment_text());
                        ScoredItem::new(item, sentiment)
                    }));
                }
                Err(e) => {
                    tracing::warn!(
                        source = %outcome.source,
                        error = %e,
                        "source failed; continuing without it"
                    );
                    failed_sources.push(outcome.source);
                }
            }
        }

        let mut ranking_degraded = false;
        if !results.is_empty() {
            if let Err(e) = rank::rank(&self.embedder, query, &mut results).await {
                tracing::warn!(error = %e, "ranking unavailable; keeping source order");
                ranking_degraded = true;
            }
        }

        let (total, counts, percentages) = truncate_and_summarize(&mut results);

        Ok(AnalysisReport {
            query: query.to_string(),
            total,
            counts,
            percentages,
            results,
            failed_sources,
            ranking_degraded,
        })
    }
}

/// Cut the result set down to [`RESULT_CAP`] and compute the summary over
/// what remains: counts by label, total, and rounded percentages. Items past
/// the cap contribute nothing to the summary.
fn truncate_and_summarize(
    results: &mut Vec<ScoredItem>,
) -> (u32, SentimentCounts, SentimentCounts) {
    results.truncate(RESULT_CAP);
    let counts = tally(results);
    let total = counts.positive + counts.negative + counts.neutral;
    (total, counts, percentages(counts, total))
}

fn tally(items: &[ScoredItem]) -> SentimentCounts {
    let mut counts = SentimentCounts::default();
    for item in items {
        counts.bump(item.sentiment);
    }
    counts
}

/// Per-label `round(count / total * 100)`. The divisor floors at 1 so an
/// empty result set yields all-zero percentages instead of dividing by zero.
fn percentages(counts: SentimentCounts, total: u32) -> SentimentCounts {
    let percent = |count: u32| -> u32 {
        let ratio = f64::from(count) / f64::from(total.max(1));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (ratio * 100.0).round() as u32
        }
    };
    SentimentCounts {
        positive: percent(counts.positive),
        negative: percent(counts.negative),
        neutral: percent(counts.neutral),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawItem, Sentiment, Source};

    fn item(sentiment: Sentiment) -> ScoredItem {
        ScoredItem::new(
            RawItem {
                source: Source::Gnews,
                title: "Headline".to_string(),
                body: None,
                url: None,
            },
            sentiment,
        )
    }

    #[test]
    fn tally_counts_sum_to_total() {
        let items = vec![
            item(Sentiment::Positive),
            item(Sentiment::Positive),
            item(Sentiment::Negative),
            item(Sentiment::Neutral),
        ];
        let counts = tally(&items);
        assert_eq!(counts.positive + counts.negative + counts.neutral, 4);
        assert_eq!(counts.positive, 2);
        assert_eq!(counts.negative, 1);
        assert_eq!(counts.neutral, 1);
    }

    #[test]
    fn truncation_caps_results_and_summary_counts_only_kept_items() {
        // 50 neutral items followed by 10 positive ones: the positives sit
        // past the cap and must not appear in the counts.
        let mut results: Vec<ScoredItem> = std::iter::repeat_with(|| item(Sentiment::Neutral))
            .take(RESULT_CAP)
            .chain(std::iter::repeat_with(|| item(Sentiment::Positive)).take(10))
            .collect();

        let (total, counts, percentages) = truncate_and_summarize(&mut results);

        assert_eq!(results.len(), RESULT_CAP);
        assert_eq!(total, 50);
        assert_eq!(counts.neutral, 50);
        assert_eq!(counts.positive, 0);
        assert_eq!(percentages.neutral, 100);
        assert_eq!(percentages.positive, 0);
    }

    #[test]
    fn truncation_leaves_small_result_sets_alone() {
        let mut results = vec![item(Sentiment::Positive), item(Sentiment::Negative)];
        let (total, counts, _) = truncate_and_summarize(&mut results);
        assert_eq!(results.len(), 2);
        assert_eq!(total, 2);
        assert_eq!(counts.positive + counts.negative + counts.neutral, 2);
    }

    #[test]
    fn percentages_round_per_label() {
        let counts = SentimentCounts {
            positive: 1,
            negative: 1,
            neutral: 1,
        };
        let p = percentages(counts, 3);
        // 1/3 rounds to 33 for each label; the sum is 99, not 100.
        assert_eq!(p.positive, 33);
        assert_eq!(p.negative, 33);
        assert_eq!(p.neutral, 33);
    }

    #[test]
    fn percentages_of_empty_set_are_zero() {
        let p = percentages(SentimentCounts::default(), 0);
        assert_eq!(p, SentimentCounts::default());
    }

    #[test]
    fn percentages_of_single_label_are_one_hundred() {
        let counts = SentimentCounts {
            positive: 5,
            negative: 0,
            neutral: 0,
        };
        let p = percentages(counts, 5);
        assert_eq!(p.positive, 100);
        assert_eq!(p.negative, 0);
        assert_eq!(p.neutral, 0);
    }
}
