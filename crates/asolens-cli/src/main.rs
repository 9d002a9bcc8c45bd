mod analyze;
mod keywords;
mod providers;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "asolens")]
#[command(about = "App Store keyword research: generate keywords with AI and score them for ASO")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate and score keywords for an App Store app and its similar apps
    Analyze {
        /// Numeric App Store id, e.g. 310633997
        #[arg(allow_hyphen_values = true)]
        app_id: String,

        /// AI provider to use (gemini or claude); defaults to AI_PROVIDER
        #[arg(short = 'p', long = "ai-provider")]
        ai_provider: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score keywords directly and rank the best opportunities
    Keywords {
        /// Keywords to score (at most 20)
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Number of top opportunities to show
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List AI providers and whether they are configured
    Providers {
        #[arg(long)]
        json: bool,
    },
    /// Show provider configuration with credentials masked
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = asolens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let services = asolens_analyzer::Services::from_app_config(&config)?;

    match command {
        Commands::Analyze {
            app_id,
            ai_provider,
            json,
        } => analyze::run_analyze(&services.analyzer, &app_id, ai_provider.as_deref(), json).await,
        Commands::Keywords {
            keywords,
            top,
            json,
        } => keywords::run_keywords(&services.analyzer, &keywords, top, json).await,
        Commands::Providers { json } => providers::run_providers(&services.providers, json),
        Commands::Config => {
            providers::run_config(&services.providers);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
