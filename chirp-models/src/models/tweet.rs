//! Tweet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tweet object as returned by the v2 API.
///
/// Only `id` and `text` are always present; every other field appears only
/// when requested through `tweet.fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possibly_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<TweetPublicMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_history_tweet_ids: Option<Vec<String>>,
}

/// Public engagement counters for a tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetPublicMetrics {
    pub retweet_count: u64,
    pub reply_count: u64,
    pub like_count: u64,
    pub quote_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impression_count: Option<u64>,
}

/// Reference from one tweet to another (retweet, quote, reply).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencedTweet {
    /// Reference kind: "retweeted", "quoted", or "replied_to".
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl Tweet {
    /// Whether this tweet is a reply.
    pub fn is_reply(&self) -> bool {
        self.referenced_tweets
            .as_deref()
            .map(|refs| refs.iter().any(|r| r.kind == "replied_to"))
            .unwrap_or(false)
            || self.in_reply_to_user_id.is_some()
    }

    /// Whether this tweet is a retweet.
    pub fn is_retweet(&self) -> bool {
        self.referenced_tweets
            .as_deref()
            .map(|refs| refs.iter().any(|r| r.kind == "retweeted"))
            .unwrap_or(false)
    }
}
