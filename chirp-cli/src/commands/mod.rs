//! Command handlers and shared CLI plumbing.

pub mod filter;
pub mod rules;
pub mod sample;
pub mod token;

use console::style;
use tracing::debug;

use chirp_api::ApiClient;
use chirp_core::config::AppConfig;
use chirp_core::error::ChirpResult;
use chirp_stream::{StreamFault, StreamFields, StreamHandler, StreamMessage};

use crate::OutputFormat;

/// Build the API client from config, applying the CLI bearer override.
pub async fn create_api_client(
    config: &AppConfig,
    bearer_override: Option<String>,
) -> ChirpResult<ApiClient> {
    let mut api_config = config.api.clone();
    if let Some(token) = bearer_override {
        api_config.bearer_token = token;
    }
    ApiClient::new(&api_config).await
}

/// Field selection flags shared by the streaming commands.
#[derive(Debug, clap::Args)]
pub struct FieldArgs {
    /// Tweet fields to request, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub tweet_fields: Vec<String>,

    /// Expansions to request, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub expansions: Vec<String>,

    /// User fields to request, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub user_fields: Vec<String>,

    /// Media fields to request, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub media_fields: Vec<String>,

    /// Place fields to request, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub place_fields: Vec<String>,

    /// Poll fields to request, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub poll_fields: Vec<String>,
}

impl FieldArgs {
    pub fn to_fields(&self) -> StreamFields {
        StreamFields {
            tweet_fields: self.tweet_fields.clone(),
            expansions: self.expansions.clone(),
            user_fields: self.user_fields.clone(),
            media_fields: self.media_fields.clone(),
            place_fields: self.place_fields.clone(),
            poll_fields: self.poll_fields.clone(),
        }
    }
}

/// Handler that prints stream events to stdout.
pub struct StreamPrinter {
    format: OutputFormat,
    received: u64,
}

impl StreamPrinter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            received: 0,
        }
    }
}

impl StreamHandler for StreamPrinter {
    fn on_message(&mut self, message: StreamMessage) {
        self.received += 1;
        match self.format {
            OutputFormat::Json => {
                let rendered = match &message {
                    StreamMessage::Tweet(tweet) => serde_json::to_string(tweet),
                    StreamMessage::Raw(value) => serde_json::to_string(value),
                };
                if let Ok(line) = rendered {
                    println!("{line}");
                }
            }
            OutputFormat::Text => match &message {
                StreamMessage::Tweet(tweet) => {
                    let when = tweet
                        .created_at
                        .map(|t| t.format("%H:%M:%S").to_string())
                        .unwrap_or_default();
                    println!(
                        "{} {} {}",
                        style(&tweet.id).dim(),
                        style(when).cyan(),
                        tweet.text.replace('\n', " ")
                    );
                }
                StreamMessage::Raw(value) => println!("{value}"),
            },
        }
    }

    fn on_keep_alive(&mut self) {
        debug!("keep-alive ({} tweets so far)", self.received);
    }

    fn on_request_error(&mut self, fault: &StreamFault) {
        eprintln!("{} connection attempt failed: {fault}", style("warn:").yellow().bold());
    }
}
