//! Filter command - stream tweets matching the active filter rules.

use console::style;

use chirp_core::config::AppConfig;
use chirp_core::error::ChirpResult;
use chirp_stream::{StreamConfig, StreamManager};

use super::{FieldArgs, StreamPrinter};
use crate::OutputFormat;

/// Run the filter command. Blocks until ctrl-c or a fatal stream error.
pub async fn run(
    config: &AppConfig,
    bearer: Option<String>,
    fields: FieldArgs,
    raw: bool,
    format: OutputFormat,
) -> ChirpResult<()> {
    let api = super::create_api_client(config, bearer).await?;

    // A filtered stream with no rules delivers nothing; warn up front.
    let rules = api.stream_rules().await?;
    let rule_count = rules.data.as_deref().map(<[_]>::len).unwrap_or(0);
    if rule_count == 0 {
        eprintln!(
            "{} no filter rules are configured, the stream will be silent \
             (add one with `chirp rules add`)",
            style("warn:").yellow().bold()
        );
    }

    let manager = StreamManager::from_api(api, StreamConfig::from(&config.stream));

    let handle = manager.disconnect_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{} disconnecting...", style("●").yellow());
            handle.disconnect();
        }
    });

    eprintln!(
        "{} streaming filtered tweets, {rule_count} rule(s) active (ctrl-c to stop)",
        style("●").green()
    );

    let mut printer = StreamPrinter::new(format);
    manager.filter(&fields.to_fields(), !raw, &mut printer).await
}
