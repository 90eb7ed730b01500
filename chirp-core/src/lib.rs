//! Chirp Core - Foundation types for the chirp Twitter API client.
//!
//! This crate provides the shared foundation used by all other chirp crates:
//! - Unified error types covering auth, transport, protocol, and stream lifecycle
//! - Application configuration (credentials, stream tuning, logging)
//! - Structured logging with tracing
//! - Common constants (API endpoints, defaults)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{ChirpError, ChirpResult};
pub use logging::init_logging;
