//! Payload line dispatch.
//!
//! Turns one non-blank line into a [`StreamMessage`], or a fatal
//! protocol error. Malformed data is never skipped: an unparseable line
//! or an `errors` field terminates the session.

use chirp_core::error::{ChirpError, ChirpResult};
use chirp_models::StreamResponse;

use crate::events::StreamMessage;

/// Parse one payload line.
///
/// A top-level `errors` field is fatal regardless of anything else the
/// object carries. With `typed` set, the envelope's `data` object is
/// mapped into a [`chirp_models::Tweet`]; otherwise the raw JSON object
/// is passed through unchanged.
pub fn process_line(line: &[u8], typed: bool) -> ChirpResult<StreamMessage> {
    let value: serde_json::Value = serde_json::from_slice(line).map_err(|e| {
        ChirpError::Protocol(format!("unparseable stream payload: {e}"))
    })?;

    if let Some(errors) = value.get("errors") {
        return Err(ChirpError::Protocol(errors.to_string()));
    }

    if !typed {
        return Ok(StreamMessage::Raw(value));
    }

    let envelope: StreamResponse = serde_json::from_value(value)
        .map_err(|e| ChirpError::Protocol(format!("malformed stream envelope: {e}")))?;
    let tweet = envelope
        .data
        .ok_or_else(|| ChirpError::Protocol("stream payload missing data object".into()))?;
    Ok(StreamMessage::Tweet(Box::new(tweet)))
}
