//! `keywords` command: direct scoring without generation.

use asolens_analyzer::Analyzer;
use asolens_core::KeywordScore;
use asolens_scoring::OpportunityReport;

pub(crate) async fn run_keywords(
    analyzer: &Analyzer,
    keywords: &[String],
    top: usize,
    json: bool,
) -> anyhow::Result<()> {
    let report = analyzer.rank_keywords(keywords, top).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &OpportunityReport) {
    println!(
        "Analyzed {} keywords on {}",
        report.total_analyzed, report.platform
    );
    print_score_table(&report.top_opportunities);

    let s = &report.summary;
    println!();
    println!(
        "excellent {} | good {} | consider {} | challenging {} | avoid {} | failed {}",
        s.excellent, s.good, s.consider, s.challenging, s.avoid, s.failed
    );
}

pub(crate) fn print_score_table(scores: &[KeywordScore]) {
    if scores.is_empty() {
        println!("  (no keywords scored)");
        return;
    }

    let width = scores
        .iter()
        .map(|s| s.keyword.chars().count())
        .max()
        .unwrap_or(0)
        .max("KEYWORD".len());

    println!(
        "  {:<width$}  {:>7}  {:>10}  {:<11}  RECOMMENDATION",
        "KEYWORD", "TRAFFIC", "DIFFICULTY", "COMPETITION"
    );
    for score in scores {
        let recommendation = match &score.error {
            Some(reason) => format!("{} ({reason})", score.recommendation),
            None => score.recommendation.to_string(),
        };
        println!(
            "  {:<width$}  {:>7}  {:>10}  {:<11}  {}",
            score.keyword,
            score.traffic_score,
            score.difficulty_score,
            score.competition_level.as_str(),
            recommendation
        );
    }
}
