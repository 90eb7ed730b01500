//! Rules command - manage filter rules for the filtered stream.

use console::style;

use chirp_core::config::AppConfig;
use chirp_core::error::ChirpResult;
use chirp_models::StreamRule;

use crate::OutputFormat;

#[derive(Debug, clap::Subcommand)]
pub enum RulesAction {
    /// List the active filter rules.
    List,
    /// Add a filter rule.
    Add {
        /// Rule value, e.g. "cats has:images -is:retweet".
        value: String,
        /// Optional tag echoed back on matching tweets.
        #[arg(long)]
        tag: Option<String>,
        /// Validate without applying.
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete filter rules by ID.
    Delete {
        /// Rule IDs to delete.
        #[arg(required = true)]
        ids: Vec<String>,
        /// Validate without applying.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Run a rules action.
pub async fn run(
    config: &AppConfig,
    bearer: Option<String>,
    action: RulesAction,
    format: OutputFormat,
) -> ChirpResult<()> {
    let api = super::create_api_client(config, bearer).await?;

    match action {
        RulesAction::List => {
            let resp = api.stream_rules().await?;
            let rules = resp.data.unwrap_or_default();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&rules)?);
                }
                OutputFormat::Text => {
                    if rules.is_empty() {
                        println!("no rules configured");
                    }
                    for rule in &rules {
                        print_rule(rule);
                    }
                }
            }
        }
        RulesAction::Add {
            value,
            tag,
            dry_run,
        } => {
            let resp = api
                .add_stream_rules(&[StreamRule::new(value, tag)], dry_run)
                .await?;
            if let Some(summary) = resp.meta.and_then(|m| m.summary) {
                println!(
                    "{} created={} invalid={}",
                    style(if dry_run { "validated" } else { "added" }).green(),
                    summary.created.or(summary.valid).unwrap_or(0),
                    summary.invalid.unwrap_or(0)
                );
            }
            if let Some(errors) = resp.errors {
                for error in errors {
                    eprintln!("{} {}", style("warn:").yellow().bold(), error.summary());
                }
            }
            for rule in resp.data.unwrap_or_default() {
                print_rule(&rule);
            }
        }
        RulesAction::Delete { ids, dry_run } => {
            let resp = api.delete_stream_rules(&ids, dry_run).await?;
            if let Some(summary) = resp.meta.and_then(|m| m.summary) {
                println!(
                    "{} deleted={} not_deleted={}",
                    style(if dry_run { "validated" } else { "deleted" }).green(),
                    summary.deleted.unwrap_or(0),
                    summary.not_deleted.unwrap_or(0)
                );
            }
        }
    }

    Ok(())
}

fn print_rule(rule: &StreamRule) {
    println!(
        "{}  {}  {}",
        style(rule.id.as_deref().unwrap_or("-")).dim(),
        style(rule.tag.as_deref().unwrap_or("")).cyan(),
        rule.value
    );
}
