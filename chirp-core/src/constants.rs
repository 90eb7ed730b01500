//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "chirp";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL for the Twitter v2 API.
pub const BASE_URL_V2: &str = "https://api.twitter.com/2";

/// Token endpoint for the OAuth2 client-credentials exchange.
pub const OAUTH2_TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";

/// Sampled stream endpoint path (relative to the v2 base URL).
pub const SAMPLE_STREAM_PATH: &str = "/tweets/sample/stream";

/// Filtered stream endpoint path.
pub const SEARCH_STREAM_PATH: &str = "/tweets/search/stream";

/// Rule management endpoint path for the filtered stream.
pub const STREAM_RULES_PATH: &str = "/tweets/search/stream/rules";

/// Default request timeout in milliseconds for one-shot API calls.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Default connect timeout in seconds for all requests.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Default number of consecutive failed stream connections before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default read buffer hint for the stream line framer, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Initial backoff delay after a failed stream connection, in seconds.
pub const BACKOFF_BASE_SECS: u64 = 5;

/// Ceiling for the exponential backoff delay, in seconds.
pub const BACKOFF_MAX_SECS: u64 = 320;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_bounds() {
        // The cap must be reachable by doubling from the base.
        let mut delay = BACKOFF_BASE_SECS;
        while delay < BACKOFF_MAX_SECS {
            delay *= 2;
        }
        assert_eq!(delay, BACKOFF_MAX_SECS);
    }

    #[test]
    fn test_stream_paths_are_relative() {
        assert!(SAMPLE_STREAM_PATH.starts_with('/'));
        assert!(SEARCH_STREAM_PATH.starts_with('/'));
        assert!(STREAM_RULES_PATH.starts_with(SEARCH_STREAM_PATH));
    }
}
