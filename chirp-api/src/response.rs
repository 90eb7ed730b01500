//! Response envelope types.
//!
//! All v2 REST responses follow a common envelope with `data`, optional
//! `includes`/`meta`, and an optional sideband `errors` array.

use serde::{Deserialize, Serialize};

use chirp_models::{ApiErrorDetail, Includes, RuleSummary};

/// Standard v2 response envelope.
///
/// ```json
/// { "data": [...], "meta": { "sent": "...", "summary": { ... } } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    /// Response payload (type varies by endpoint).
    pub data: Option<T>,
    /// Expansion objects referenced by the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<Includes>,
    /// Request metadata (rule summaries, counts, timestamps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    /// Partial errors delivered alongside data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiErrorDetail>>,
}

/// Metadata attached to rule and lookup responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Server timestamp of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<String>,
    /// Rule-change counters for rule update calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RuleSummary>,
    /// Result count for lookup calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
}

impl<T> ApiResponse<T> {
    /// Whether the envelope carries partial errors.
    pub fn has_errors(&self) -> bool {
        self.errors.as_deref().map(|e| !e.is_empty()).unwrap_or(false)
    }

    /// One-line summary of the partial errors, if any.
    pub fn error_summary(&self) -> Option<String> {
        self.errors.as_deref().map(|errors| {
            errors
                .iter()
                .map(|e| e.summary())
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_models::StreamRule;

    #[test]
    fn test_rules_list_envelope() {
        let json = r#"{
            "data": [
                {"id": "1165037377523306498", "value": "dog has:images", "tag": "dog pictures"},
                {"id": "1165037377523306499", "value": "cat has:images -grumpy"}
            ],
            "meta": {"sent": "2019-08-29T01:12:10.729Z"}
        }"#;
        let resp: ApiResponse<Vec<StreamRule>> = serde_json::from_str(json).unwrap();
        let rules = resp.data.as_ref().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].tag.as_deref(), Some("dog pictures"));
        assert!(rules[1].tag.is_none());
        assert!(!resp.has_errors());
    }

    #[test]
    fn test_rule_add_envelope_with_summary() {
        let json = r#"{
            "data": [{"id": "1166895166402457600", "value": "cats has:media"}],
            "meta": {
                "sent": "2019-08-29T02:07:42.205Z",
                "summary": {"created": 1, "not_created": 0, "valid": 1, "invalid": 0}
            }
        }"#;
        let resp: ApiResponse<Vec<StreamRule>> = serde_json::from_str(json).unwrap();
        let summary = resp.meta.unwrap().summary.unwrap();
        assert_eq!(summary.created, Some(1));
        assert_eq!(summary.invalid, Some(0));
    }

    #[test]
    fn test_partial_errors() {
        let json = r#"{
            "data": [{"id": "1", "value": "ok rule"}],
            "errors": [{"title": "DuplicateRule", "detail": "rule already exists"}]
        }"#;
        let resp: ApiResponse<Vec<StreamRule>> = serde_json::from_str(json).unwrap();
        assert!(resp.has_errors());
        assert!(resp.error_summary().unwrap().contains("DuplicateRule"));
    }
}
