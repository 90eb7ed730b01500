//! Chirp API - HTTP collaborator for the Twitter v2 API.
//!
//! This crate supplies the two primitives the streaming core depends on:
//! an opaque bearer credential (given directly or obtained via the OAuth2
//! client-credentials exchange) and a reqwest-backed client that issues
//! one-shot JSON requests and opens streaming GET connections. It also
//! carries the filtered-stream rule endpoints, which are one-shot calls.

pub mod auth;
pub mod client;
pub mod response;
pub mod rules;

// Re-export key types
pub use auth::Credential;
pub use client::ApiClient;
pub use response::{ApiResponse, ResponseMeta};
