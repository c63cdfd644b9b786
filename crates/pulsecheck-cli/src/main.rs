//! Command line front-end for the pulsecheck analysis pipeline.

use std::fmt::Write as _;

use clap::Parser;
use pulsecheck_sentiment::{AnalysisReport, Analyzer, AnalyzerConfig};

#[derive(Debug, Parser)]
#[command(name = "pulsecheck")]
#[command(about = "Aggregate public sentiment about a topic from news, encyclopedia, and discussion sources")]
struct Cli {
    /// Topic to analyze
    query: String,

    /// Emit the full report as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = AnalyzerConfig::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    let analyzer = Analyzer::new(config);
    let report = analyzer.analyze(&cli.query).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}

/// Human-readable rendering of a report: summary block, then one line per
/// ranked result.
fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "sentiment for \"{}\"", report.query);
    let _ = writeln!(
        out,
        "  {} items | positive {} ({}%) | negative {} ({}%) | neutral {} ({}%)",
        report.total,
        report.counts.positive,
        report.percentages.positive,
        report.counts.negative,
        report.percentages.negative,
        report.counts.neutral,
        report.percentages.neutral,
    );
    if !report.failed_sources.is_empty() {
        let failed: Vec<&str> = report
            .failed_sources
            .iter()
            .map(|s| s.as_str())
            .collect();
        let _ = writeln!(out, "  degraded: no results from {}", failed.join(", "));
    }
    if report.ranking_degraded {
        let _ = writeln!(out, "  degraded: relevance ranking unavailable, source order kept");
    }

    for item in &report.results {
        let _ = writeln!(
            out,
            "  [{:<9}] {:.3}  {}  {}",
            item.source,
            item.relevance,
            item.sentiment,
            item.title
        );
        if let Some(url) = &item.url {
            let _ = writeln!(out, "              {url}");
        }
    }
    out
}
