//! HTTP client for the Twitter v2 API.
//!
//! Wraps `reqwest::Client` with bearer authentication, timeout and proxy
//! configuration, one-shot request/parse primitives, and the streaming
//! GET used by the stream controller.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use chirp_core::config::ApiConfig;
use chirp_core::constants;
use chirp_core::error::{ChirpError, ChirpResult};

use crate::auth::{self, Credential};
use crate::response::ApiResponse;

/// HTTP client for communicating with the Twitter v2 API.
///
/// Timeout and proxy settings are fixed at construction and apply for the
/// client's whole lifetime. One-shot requests carry a total request
/// timeout; streaming requests only carry the connect timeout, since the
/// body is intentionally unbounded in time.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Client,
    /// Base URL for the v2 API (e.g. "https://api.twitter.com/2").
    base_url: String,
    /// Bearer credential, if any source was configured.
    credential: Option<Credential>,
    /// Total timeout for one-shot requests.
    timeout: Duration,
}

impl ApiClient {
    /// Create a new ApiClient from configuration.
    ///
    /// When only a consumer key pair is configured, this performs the
    /// app-only token exchange. With no credential source at all the
    /// client is still constructed; authenticated calls fail with
    /// `AuthRequired`.
    pub async fn new(config: &ApiConfig) -> ChirpResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(constants::DEFAULT_CONNECT_TIMEOUT_SECS))
            .tcp_keepalive(Duration::from_secs(30));

        if let Some(ref proxy_url) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| ChirpError::Config(format!("invalid proxy url: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| ChirpError::Http(format!("failed to build HTTP client: {e}")))?;

        let credential = if !config.bearer_token.is_empty() {
            Some(Credential::bearer(config.bearer_token.clone()))
        } else if !config.consumer_key.is_empty() && !config.consumer_secret.is_empty() {
            let cred = auth::request_app_only_token(
                &inner,
                &config.consumer_key,
                &config.consumer_secret,
            )
            .await?;
            Some(cred)
        } else {
            None
        };

        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the attached credential, failing fast when none is configured.
    pub fn credential(&self) -> ChirpResult<&Credential> {
        self.credential.as_ref().ok_or(ChirpError::AuthRequired)
    }

    /// Whether a credential is attached.
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer credential to a request builder.
    fn authorize(&self, builder: RequestBuilder) -> ChirpResult<RequestBuilder> {
        let cred = self.credential()?;
        Ok(builder.header(AUTHORIZATION, cred.header_value()))
    }

    // --- One-shot primitives ---

    /// Execute a GET request with the one-shot timeout.
    pub async fn get(&self, path: &str, params: &[(String, String)]) -> ChirpResult<Response> {
        debug!("GET {}", path);
        let builder = self
            .inner
            .get(self.url(path))
            .query(params)
            .timeout(self.timeout);
        self.authorize(builder)?
            .send()
            .await
            .map_err(Self::classify_error)
    }

    /// Execute a POST request with a JSON body and the one-shot timeout.
    pub async fn post(
        &self,
        path: &str,
        params: &[(String, String)],
        body: &serde_json::Value,
    ) -> ChirpResult<Response> {
        debug!("POST {}", path);
        let builder = self
            .inner
            .post(self.url(path))
            .query(params)
            .json(body)
            .timeout(self.timeout);
        self.authorize(builder)?
            .send()
            .await
            .map_err(Self::classify_error)
    }

    /// Parse a response body into a typed envelope.
    ///
    /// A top-level `errors` field without any `data` alongside it is
    /// fatal; partial errors next to data are preserved in the envelope.
    /// A non-success status with no readable error detail surfaces as a
    /// status error.
    pub async fn parse_response<T: DeserializeOwned>(
        response: Response,
    ) -> ChirpResult<ApiResponse<T>> {
        let status = response.status();
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChirpError::Serialization(format!("failed to parse response: {e}")))?;

        if value.get("data").is_none() {
            if let Some(errors) = value.get("errors") {
                return Err(ChirpError::Api(errors.to_string()));
            }
        }
        if !status.is_success() {
            return Err(ChirpError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_value(value)
            .map_err(|e| ChirpError::Serialization(format!("unexpected response shape: {e}")))?;
        Ok(envelope)
    }

    /// Convenience: GET + parse into a typed envelope.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> ChirpResult<ApiResponse<T>> {
        let resp = self.get(path, params).await?;
        Self::parse_response(resp).await
    }

    /// Convenience: POST + parse into a typed envelope.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
        body: &serde_json::Value,
    ) -> ChirpResult<ApiResponse<T>> {
        let resp = self.post(path, params, body).await?;
        Self::parse_response(resp).await
    }

    // --- Streaming primitive ---

    /// Open a streaming GET connection.
    ///
    /// Returns the raw response; the caller inspects the status and pulls
    /// body chunks. No total timeout is applied: the connection is
    /// expected to stay open indefinitely, bounded only by the connect
    /// timeout and TCP keepalive configured at construction. Dropping the
    /// response aborts the connection.
    pub async fn open_stream(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> ChirpResult<Response> {
        debug!("GET (stream) {}", path);
        let builder = self.inner.get(self.url(path)).query(params);
        self.authorize(builder)?
            .send()
            .await
            .map_err(Self::classify_error)
    }

    /// Classify a reqwest error into a ChirpError variant.
    fn classify_error(e: reqwest::Error) -> ChirpError {
        if e.is_timeout() {
            ChirpError::Timeout(e.to_string())
        } else if e.is_connect() {
            ChirpError::Transport(format!("connection failed: {e}"))
        } else {
            ChirpError::Http(e.to_string())
        }
    }
}
