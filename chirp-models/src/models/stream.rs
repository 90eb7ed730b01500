//! Streaming envelope and filtered-stream rule models.

use serde::{Deserialize, Serialize};

use super::error::ApiErrorDetail;
use super::tweet::Tweet;
use super::user::User;

/// Envelope for one payload line on the sampled or filtered stream.
///
/// ```json
/// { "data": { ... tweet ... }, "includes": { "users": [...] },
///   "matching_rules": [{"id": "...", "tag": "..."}] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Tweet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<Includes>,
    /// Present on the filtered stream: the rules this tweet matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_rules: Option<Vec<MatchingRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiErrorDetail>>,
}

/// Expansion objects referenced by the primary data object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Includes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweets: Option<Vec<Tweet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
}

/// A filtered-stream rule that matched the delivered tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingRule {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A filtered-stream rule definition.
///
/// `id` is assigned by the server; omit it when adding rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl StreamRule {
    /// Build a rule to submit, optionally tagged.
    pub fn new(value: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
            tag,
        }
    }
}

/// Rule-change counters returned in the `meta.summary` of rule updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_created: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_deleted: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stream_envelope() {
        let json = r#"{
            "data": {
                "id": "1067094924124872705",
                "text": "Just getting started with Twitter APIs?",
                "author_id": "2244994945"
            },
            "includes": {
                "users": [{"id": "2244994945", "name": "Twitter Dev", "username": "TwitterDev"}]
            }
        }"#;
        let resp: StreamResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.as_ref().unwrap().author_id.as_deref(), Some("2244994945"));
        assert_eq!(resp.includes.unwrap().users.unwrap().len(), 1);
        assert!(resp.matching_rules.is_none());
        assert!(resp.errors.is_none());
    }

    #[test]
    fn test_filtered_stream_envelope() {
        let json = r#"{
            "data": {"id": "1", "text": "cats are great"},
            "matching_rules": [{"id": "1166916266197536768", "tag": "cat tweets"}]
        }"#;
        let resp: StreamResponse = serde_json::from_str(json).unwrap();
        let rules = resp.matching_rules.unwrap();
        assert_eq!(rules[0].tag.as_deref(), Some("cat tweets"));
    }

    #[test]
    fn test_errors_only_envelope() {
        let json = r#"{
            "errors": [{"title": "operational-disconnect",
                        "detail": "This stream has been disconnected upstream for operational reasons."}]
        }"#;
        let resp: StreamResponse = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors.unwrap().len(), 1);
    }

    #[test]
    fn test_stream_rule_serialize() {
        let rule = StreamRule::new("cats has:images", Some("cat pics".into()));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["value"], "cats has:images");
        assert_eq!(json["tag"], "cat pics");
        assert!(json.get("id").is_none(), "unassigned id must be omitted");
    }
}
