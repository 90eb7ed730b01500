//! Chirp Models - Typed domain objects for the Twitter v2 API.
//!
//! This crate owns the serde models for everything the client parses off
//! the wire: tweet and user objects, the streaming response envelope with
//! its expansions and matching rules, filtered-stream rules, and the
//! partial-error detail objects the API attaches to responses.

pub mod models;

// Re-export key types
pub use models::error::ApiErrorDetail;
pub use models::stream::{Includes, MatchingRule, RuleSummary, StreamResponse, StreamRule};
pub use models::tweet::{ReferencedTweet, Tweet, TweetPublicMetrics};
pub use models::user::{User, UserPublicMetrics};
