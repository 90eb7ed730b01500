//! Partial-error detail objects attached to API responses.

use serde::{Deserialize, Serialize};

/// One entry of a top-level `errors` array.
///
/// The API attaches these both to one-shot responses (alongside `data`
/// for partial failures) and to stream payloads (where their presence is
/// fatal for the session).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// The offending parameter, when the error concerns a request value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// The offending value, when the error concerns a request value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl ApiErrorDetail {
    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        match (&self.title, &self.detail) {
            (Some(t), Some(d)) => format!("{t}: {d}"),
            (Some(t), None) => t.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) => "unknown api error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_parse() {
        let json = r#"{
            "title": "Forbidden",
            "detail": "This stream is currently at the maximum allowed connection limit.",
            "type": "https://api.twitter.com/2/problems/streaming-connection"
        }"#;
        let detail: ApiErrorDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.title.as_deref(), Some("Forbidden"));
        assert!(detail.summary().starts_with("Forbidden: This stream"));
    }

    #[test]
    fn test_summary_fallbacks() {
        let detail = ApiErrorDetail {
            title: None,
            detail: None,
            error_type: None,
            parameter: None,
            value: None,
        };
        assert_eq!(detail.summary(), "unknown api error");
    }
}
