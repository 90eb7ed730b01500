//! Chirp Stream - Streaming connection lifecycle for the Twitter v2 API.
//!
//! This crate owns the long-lived streaming connection:
//! - Line framing of the chunked response body, with blank-line keep-alives
//! - Dispatch of payload lines into raw or typed messages
//! - Connect / read / classify / backoff / retry state machine
//! - Cooperative cancellation from another task via a shared flag
//!
//! The HTTP side (credential, opening the GET) is delegated to
//! `chirp-api` behind the [`StreamTransport`] seam, which also keeps the
//! state machine testable without a network.

pub mod dispatch;
pub mod events;
pub mod framer;
pub mod manager;
pub mod transport;

// Re-export key types
pub use events::{StreamFault, StreamHandler, StreamMessage};
pub use framer::LineFramer;
pub use manager::{BackoffConfig, DisconnectHandle, StreamConfig, StreamFields, StreamManager};
pub use transport::{HttpTransport, StreamBody, StreamConnection, StreamTransport};
