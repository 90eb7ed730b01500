//! Token command - app-only bearer token exchange.

use console::style;

use chirp_api::auth;
use chirp_core::error::ChirpResult;

/// Exchange the consumer key pair and print the bearer token.
pub async fn run(consumer_key: &str, consumer_secret: &str) -> ChirpResult<()> {
    let client = reqwest::Client::new();
    let credential = auth::request_app_only_token(&client, consumer_key, consumer_secret).await?;

    eprintln!(
        "{} token exchange succeeded, add this to your config as api.bearer_token:",
        style("●").green()
    );
    println!("{}", credential.token());
    Ok(())
}
