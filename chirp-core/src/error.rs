//! Global error types for the chirp client.
//!
//! All error categories across the workspace are unified into a single
//! `ChirpError` enum with conversions from underlying library errors.
//! The streaming state machine depends on the distinction between
//! recoverable faults (`Transport`, `Status`) and fatal ones
//! (`Protocol`, `AuthRequired`, `AlreadyRunning`).

use thiserror::Error;

/// Convenience type alias for Results using ChirpError.
pub type ChirpResult<T> = Result<T, ChirpError>;

/// Unified error type covering all error categories in chirp.
#[derive(Error, Debug)]
pub enum ChirpError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Auth errors --
    /// No credential is available. Not retried.
    #[error("no credential available, provide a bearer token or consumer key pair")]
    AuthRequired,

    /// The token exchange or an authenticated request was rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    // -- Network errors --
    /// HTTP request failed outside the streaming path.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Transport-level fault while opening or reading a stream.
    /// Recovered with backoff up to the retry budget.
    #[error("transport fault: {0}")]
    Transport(String),

    /// The streaming endpoint answered with a non-success status.
    #[error("stream request failed with status {status}")]
    Status {
        /// HTTP status code returned by the server.
        status: u16,
    },

    // -- Stream lifecycle errors --
    /// A streaming session is already active on this controller.
    #[error("a stream session is already running")]
    AlreadyRunning,

    /// The retry budget was consumed by consecutive connection failures.
    #[error("stream gave up after {attempts} consecutive failed attempts")]
    RetriesExhausted {
        /// Number of consecutive failed attempts.
        attempts: u32,
    },

    /// The stream payload violated the wire contract: an `errors` field
    /// or an unparseable line. Fatal for the session, never retried.
    #[error("protocol error: {0}")]
    Protocol(String),

    // -- REST collaborator errors --
    /// A one-shot API response carried a top-level `errors` field.
    #[error("api error: {0}")]
    Api(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for ChirpError {
    fn from(e: serde_json::Error) -> Self {
        ChirpError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for ChirpError {
    fn from(e: toml::de::Error) -> Self {
        ChirpError::Config(e.to_string())
    }
}

impl ChirpError {
    /// Whether the stream controller may recover from this error by
    /// reconnecting. Everything else terminates the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ChirpError::Transport(_) | ChirpError::Status { .. } | ChirpError::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChirpError::Status { status: 429 };
        assert_eq!(err.to_string(), "stream request failed with status 429");

        let err = ChirpError::RetriesExhausted { attempts: 3 };
        assert_eq!(
            err.to_string(),
            "stream gave up after 3 consecutive failed attempts"
        );
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(ChirpError::Transport("reset".into()).is_recoverable());
        assert!(ChirpError::Status { status: 503 }.is_recoverable());
        assert!(!ChirpError::Protocol("errors field".into()).is_recoverable());
        assert!(!ChirpError::AuthRequired.is_recoverable());
        assert!(!ChirpError::AlreadyRunning.is_recoverable());
    }

    #[test]
    fn test_serde_json_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ChirpError = parse_err.into();
        assert!(matches!(err, ChirpError::Serialization(_)));
    }
}
