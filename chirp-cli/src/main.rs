//! Chirp CLI - Command-line interface for the chirp streaming client.
//!
//! Streams sampled or filtered tweets to the terminal, manages filter
//! rules, and performs the app-only token exchange. Useful for watching
//! a stream from a shell, scripting with `--format json`, and debugging
//! connection behavior with `--verbose`.

mod commands;

use clap::{Parser, Subcommand};
use tracing::info;

use chirp_core::config::AppConfig;
use chirp_core::error::ChirpResult;
use chirp_core::logging;

/// Chirp - Twitter v2 streaming client.
#[derive(Parser)]
#[command(
    name = "chirp",
    version,
    about = "Stream tweets from the Twitter v2 API",
    long_about = "A command-line client for the Twitter v2 streaming API.\n\
                  Consumes the sampled or filtered stream with automatic\n\
                  reconnection and exponential backoff."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Bearer token (overrides config).
    #[arg(long, global = true)]
    bearer_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream the 1% sampled firehose.
    Sample {
        #[command(flatten)]
        fields: commands::FieldArgs,
        /// Emit raw JSON payloads instead of typed tweets.
        #[arg(long)]
        raw: bool,
    },
    /// Stream tweets matching the active filter rules.
    Filter {
        #[command(flatten)]
        fields: commands::FieldArgs,
        /// Emit raw JSON payloads instead of typed tweets.
        #[arg(long)]
        raw: bool,
    },
    /// Manage filter rules for the filtered stream.
    Rules {
        #[command(subcommand)]
        action: commands::rules::RulesAction,
    },
    /// Exchange a consumer key pair for an app-only bearer token.
    Token {
        /// App consumer key.
        consumer_key: String,
        /// App consumer secret.
        consumer_secret: String,
    },
}

#[tokio::main]
async fn main() -> ChirpResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from_file(std::path::Path::new(path))?
    } else {
        AppConfig::load_default()?
    };

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(log_level, &log_dir, config.logging.json_output)?;

    info!("chirp v{}", chirp_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Sample { fields, raw } => {
            commands::sample::run(&config, cli.bearer_token, fields, raw, cli.format).await
        }
        Commands::Filter { fields, raw } => {
            commands::filter::run(&config, cli.bearer_token, fields, raw, cli.format).await
        }
        Commands::Rules { action } => {
            commands::rules::run(&config, cli.bearer_token, action, cli.format).await
        }
        Commands::Token {
            consumer_key,
            consumer_secret,
        } => commands::token::run(&consumer_key, &consumer_secret).await,
    }
}
