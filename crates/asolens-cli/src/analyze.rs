//! `analyze` command: full pipeline for one app.

use asolens_analyzer::Analyzer;
use asolens_core::AnalysisResult;
use asolens_providers::GenerationRequest;

use crate::keywords::print_score_table;

pub(crate) async fn run_analyze(
    analyzer: &Analyzer,
    app_id: &str,
    ai_provider: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let request = GenerationRequest::with_provider(ai_provider);
    let result = analyzer.analyze(app_id, &request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_analysis(&result);
    }
    Ok(())
}

fn print_analysis(result: &AnalysisResult) {
    println!("App: {}", result.app_data.title);
    if !result.app_data.genres.is_empty() {
        println!("Genres: {}", result.app_data.genres.join(", "));
    }

    if result.similar_apps.is_empty() {
        println!("Similar apps: none");
    } else {
        let titles: Vec<&str> = result.similar_apps.iter().map(|a| a.title.as_str()).collect();
        println!("Similar apps: {}", titles.join(", "));
    }
    for skip in &result.skipped {
        println!("  skipped {} at {}: {}", skip.item, skip.stage, skip.reason);
    }

    println!();
    println!(
        "Keywords: {} from the app, {} from similar apps",
        result.main_app_keywords.len(),
        result.similar_app_keywords.len()
    );
    for keyword in &result.main_app_keywords {
        println!("  - {keyword}");
    }

    println!();
    println!("Scored sample:");
    print_score_table(&result.keyword_analysis);
}
