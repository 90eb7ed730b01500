//! Sample command - stream the 1% sampled firehose.

use console::style;

use chirp_core::config::AppConfig;
use chirp_core::error::ChirpResult;
use chirp_stream::{StreamConfig, StreamManager};

use super::{FieldArgs, StreamPrinter};
use crate::OutputFormat;

/// Run the sample command. Blocks until ctrl-c or a fatal stream error.
pub async fn run(
    config: &AppConfig,
    bearer: Option<String>,
    fields: FieldArgs,
    raw: bool,
    format: OutputFormat,
) -> ChirpResult<()> {
    let api = super::create_api_client(config, bearer).await?;
    let manager = StreamManager::from_api(api, StreamConfig::from(&config.stream));

    let handle = manager.disconnect_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{} disconnecting...", style("●").yellow());
            handle.disconnect();
        }
    });

    eprintln!(
        "{} streaming sampled tweets (ctrl-c to stop)",
        style("●").green()
    );

    let mut printer = StreamPrinter::new(format);
    manager.sample(&fields.to_fields(), !raw, &mut printer).await
}
