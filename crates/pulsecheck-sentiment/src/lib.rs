//! Topic sentiment aggregation pipeline for pulsecheck.
//!
//! Fans a query out to GNews, Wikipedia, and Reddit concurrently, classifies
//! each collected text with a lexicon/valence compound score, ranks everything
//! by embedding cosine similarity against the query via TEI, and returns a
//! summary plus the ranked result set. Individual source failures degrade the
//! result set instead of failing the run.

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod types;

mod embeddings;
mod rank;
mod sources;

pub use classifier::{classify, compound_score};
pub use error::AnalysisError;
pub use pipeline::Analyzer;
pub use types::{
    AnalysisReport, AnalyzerConfig, RawItem, ScoredItem, Sentiment, SentimentCounts, Source,
};
