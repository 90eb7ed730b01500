//! Bearer credential and the one-shot app-only token exchange.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use chirp_core::constants;
use chirp_core::error::{ChirpError, ChirpResult};

/// An opaque bearer credential attached to outgoing requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wrap an existing bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The `Authorization` header value for this credential.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// The raw token value, for explicit display or persistence.
    /// Debug formatting stays redacted.
    pub fn token(&self) -> &str {
        &self.token
    }
}

// The token never appears in logs or debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Exchange a consumer key pair for an app-only bearer token.
///
/// Issues `POST /oauth2/token` with HTTP Basic auth and
/// `grant_type=client_credentials`. An `errors` field in the response
/// body is fatal.
pub async fn request_app_only_token(
    client: &reqwest::Client,
    consumer_key: &str,
    consumer_secret: &str,
) -> ChirpResult<Credential> {
    let basic = STANDARD.encode(format!("{consumer_key}:{consumer_secret}"));

    debug!("requesting app-only bearer token");
    let resp = client
        .post(constants::OAUTH2_TOKEN_URL)
        .header(AUTHORIZATION, format!("Basic {basic}"))
        .header(
            CONTENT_TYPE,
            "application/x-www-form-urlencoded;charset=UTF-8",
        )
        .body("grant_type=client_credentials")
        .send()
        .await
        .map_err(|e| ChirpError::AuthFailed(format!("token exchange request failed: {e}")))?;

    let data: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| ChirpError::AuthFailed(format!("unreadable token response: {e}")))?;

    if let Some(errors) = data.get("errors") {
        return Err(ChirpError::AuthFailed(errors.to_string()));
    }

    let token = data
        .get("access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ChirpError::AuthFailed("token response missing access_token".into()))?;

    Ok(Credential::bearer(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let cred = Credential::bearer("AAAA%3DAAAA");
        assert_eq!(cred.header_value(), "Bearer AAAA%3DAAAA");
    }

    #[test]
    fn test_debug_redacts_token() {
        let cred = Credential::bearer("super-secret");
        let rendered = format!("{cred:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(rendered, "Credential(<redacted>)");
    }

    #[test]
    fn test_basic_auth_encoding() {
        // The Basic auth payload is base64("key:secret").
        let encoded = STANDARD.encode("xvz1evFS4wEEPTGEFPHBog:L8qq9PZyRg6ieKGEKhZolGC0vJWLw8iEJ88DRdyOg");
        assert_eq!(
            encoded,
            "eHZ6MWV2RlM0d0VFUFRHRUZQSEJvZzpMOHFxOVBaeVJnNmllS0dFS2hab2xHQzB2SldMdzhpRUo4OERSZHlPZw=="
        );
    }
}
