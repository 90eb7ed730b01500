//! Stream event types and the caller-facing handler trait.

use std::fmt;

use tracing::{debug, info};

use chirp_models::Tweet;

/// One payload delivered by the stream, after dispatch.
#[derive(Debug, Clone)]
pub enum StreamMessage {
    /// The raw JSON object, when typed output was not requested.
    Raw(serde_json::Value),
    /// The typed tweet from the envelope's `data` object.
    Tweet(Box<Tweet>),
}

impl StreamMessage {
    /// The typed tweet, if this message carries one.
    pub fn as_tweet(&self) -> Option<&Tweet> {
        match self {
            StreamMessage::Tweet(tweet) => Some(tweet),
            StreamMessage::Raw(_) => None,
        }
    }

    /// The raw JSON value, if this message was left untyped.
    pub fn as_raw(&self) -> Option<&serde_json::Value> {
        match self {
            StreamMessage::Raw(value) => Some(value),
            StreamMessage::Tweet(_) => None,
        }
    }
}

/// Why a connection attempt failed. One fault is reported per failed
/// attempt, before the backoff sleep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFault {
    /// The server answered with a non-success status.
    Status(u16),
    /// A transport-level fault while opening or reading the connection.
    Transport(String),
}

impl fmt::Display for StreamFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamFault::Status(status) => write!(f, "status {status}"),
            StreamFault::Transport(detail) => write!(f, "transport fault: {detail}"),
        }
    }
}

/// Callback surface invoked synchronously, in wire order, on the
/// controller's task.
///
/// All methods have logging defaults; override the ones you care about.
pub trait StreamHandler: Send {
    /// A payload line was dispatched.
    fn on_message(&mut self, message: StreamMessage) {
        match message {
            StreamMessage::Tweet(tweet) => info!("received tweet {}", tweet.id),
            StreamMessage::Raw(value) => info!("received payload: {value}"),
        }
    }

    /// A blank keep-alive line arrived.
    fn on_keep_alive(&mut self) {
        debug!("received keep-alive signal");
    }

    /// A connection attempt failed; backoff follows.
    fn on_request_error(&mut self, fault: &StreamFault) {
        debug!("stream request failed: {fault}");
    }
}
