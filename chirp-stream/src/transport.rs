//! Transport seam between the stream controller and the HTTP layer.
//!
//! The controller only needs three things from a transport: a fail-fast
//! credential check, a way to open one streaming GET, and a pull-based
//! chunk source for the body. `HttpTransport` is the production
//! implementation on top of [`chirp_api::ApiClient`]; tests substitute
//! scripted implementations.

use async_trait::async_trait;
use bytes::Bytes;

use chirp_core::error::{ChirpError, ChirpResult};

use chirp_api::ApiClient;

/// Pull-based chunk source for one open stream body.
#[async_trait]
pub trait StreamBody: Send {
    /// Next body chunk. `Ok(None)` means the server closed the stream
    /// cleanly; an error is a transport fault.
    async fn next_chunk(&mut self) -> ChirpResult<Option<Bytes>>;
}

/// One open streaming connection: the response status plus its body.
///
/// The connection is exclusively owned by the session reading it and is
/// aborted by dropping it, on every exit path.
pub struct StreamConnection {
    /// HTTP status the server answered with.
    pub status: u16,
    /// The chunked body.
    pub body: Box<dyn StreamBody>,
}

/// Opens streaming connections on behalf of the controller.
#[async_trait]
pub trait StreamTransport: Send + Sync {
    /// Fail fast when no credential is attached. Called once per
    /// `connect`, before any session state is touched.
    fn check_auth(&self) -> ChirpResult<()>;

    /// Open one streaming GET with the credential attached.
    async fn open(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> ChirpResult<StreamConnection>;
}

/// Production transport delegating to the HTTP collaborator.
pub struct HttpTransport {
    client: ApiClient,
}

impl HttpTransport {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StreamTransport for HttpTransport {
    fn check_auth(&self) -> ChirpResult<()> {
        self.client.credential().map(|_| ())
    }

    async fn open(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> ChirpResult<StreamConnection> {
        let response = self.client.open_stream(path, params).await?;
        let status = response.status().as_u16();
        Ok(StreamConnection {
            status,
            body: Box::new(HttpBody { response }),
        })
    }
}

/// Body adapter over a reqwest streaming response.
struct HttpBody {
    response: reqwest::Response,
}

#[async_trait]
impl StreamBody for HttpBody {
    async fn next_chunk(&mut self) -> ChirpResult<Option<Bytes>> {
        self.response
            .chunk()
            .await
            .map_err(|e| ChirpError::Transport(format!("stream read failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::config::ApiConfig;

    #[tokio::test]
    async fn test_check_auth_without_credential() {
        let client = ApiClient::new(&ApiConfig::default()).await.unwrap();
        let transport = HttpTransport::new(client);
        assert!(matches!(
            transport.check_auth(),
            Err(ChirpError::AuthRequired)
        ));
    }

    #[tokio::test]
    async fn test_check_auth_with_bearer() {
        let config = ApiConfig {
            bearer_token: "token".into(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).await.unwrap();
        let transport = HttpTransport::new(client);
        assert!(transport.check_auth().is_ok());
    }
}
