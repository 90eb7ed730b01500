//! Filtered-stream rule endpoints.
//!
//! Rules are managed through one-shot calls against
//! `/tweets/search/stream/rules`; the stream controller never touches
//! them directly.

use serde_json::json;

use chirp_core::constants::STREAM_RULES_PATH;
use chirp_core::error::ChirpResult;
use chirp_models::StreamRule;

use crate::client::ApiClient;
use crate::response::ApiResponse;

fn dry_run_params(dry_run: bool) -> Vec<(String, String)> {
    if dry_run {
        vec![("dry_run".into(), "true".into())]
    } else {
        Vec::new()
    }
}

impl ApiClient {
    /// List the active rules on the filtered stream.
    pub async fn stream_rules(&self) -> ChirpResult<ApiResponse<Vec<StreamRule>>> {
        self.get_json(STREAM_RULES_PATH, &[]).await
    }

    /// Add rules to the filtered stream.
    ///
    /// With `dry_run` the rules are validated but not applied.
    pub async fn add_stream_rules(
        &self,
        rules: &[StreamRule],
        dry_run: bool,
    ) -> ChirpResult<ApiResponse<Vec<StreamRule>>> {
        let body = json!({ "add": rules });
        self.post_json(STREAM_RULES_PATH, &dry_run_params(dry_run), &body)
            .await
    }

    /// Delete rules from the filtered stream by ID.
    pub async fn delete_stream_rules(
        &self,
        ids: &[String],
        dry_run: bool,
    ) -> ChirpResult<ApiResponse<Vec<StreamRule>>> {
        let body = json!({ "delete": { "ids": ids } });
        self.post_json(STREAM_RULES_PATH, &dry_run_params(dry_run), &body)
            .await
    }
}
