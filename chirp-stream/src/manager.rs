//! Stream controller.
//!
//! Owns the connection lifecycle for one streaming endpoint: connect,
//! read lines, classify them, back off and retry on connection failures
//! up to the retry budget, and honor a cooperative disconnect requested
//! from another task.
//!
//! Only consecutive failures count toward the budget: a successful
//! reconnect clears prior failure history, and the next failure's delay
//! restarts from the base. Payload-level protocol errors are fatal and
//! never retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use chirp_api::ApiClient;
use chirp_core::config::StreamSettings;
use chirp_core::constants;
use chirp_core::error::{ChirpError, ChirpResult};

use crate::dispatch;
use crate::events::{StreamFault, StreamHandler};
use crate::framer::LineFramer;
use crate::transport::{HttpTransport, StreamConnection, StreamTransport};

/// Exponential backoff configuration for reconnection attempts.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Delay after the first failure.
    pub base: Duration,
    /// Ceiling the doubling delay is clamped to.
    pub max: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(constants::BACKOFF_BASE_SECS),
            max: Duration::from_secs(constants::BACKOFF_MAX_SECS),
        }
    }
}

impl BackoffConfig {
    /// Delay before reconnect attempt `attempt` (zero-based):
    /// `min(base * 2^attempt, max)`. Once clamped it stays at the cap.
    pub fn delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay_ms = base_ms.saturating_mul(factor);
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(delay_ms.min(max_ms))
    }
}

/// Stream controller configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Consecutive failed connection attempts before giving up.
    pub max_retries: u32,
    /// Read buffer hint for the line framer, in bytes.
    pub chunk_size: usize,
    /// Backoff timing.
    pub backoff: BackoffConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_retries: constants::DEFAULT_MAX_RETRIES,
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
            backoff: BackoffConfig::default(),
        }
    }
}

impl From<&StreamSettings> for StreamConfig {
    fn from(settings: &StreamSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            chunk_size: settings.chunk_size,
            backoff: BackoffConfig {
                base: Duration::from_secs(settings.backoff_base_secs),
                max: Duration::from_secs(settings.backoff_max_secs),
            },
        }
    }
}

/// Field and expansion selection for a streaming request.
#[derive(Debug, Clone, Default)]
pub struct StreamFields {
    pub tweet_fields: Vec<String>,
    pub expansions: Vec<String>,
    pub user_fields: Vec<String>,
    pub media_fields: Vec<String>,
    pub place_fields: Vec<String>,
    pub poll_fields: Vec<String>,
}

impl StreamFields {
    /// Render the non-empty selections as comma-separated query params.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_fields(&mut params, "tweet.fields", &self.tweet_fields);
        push_fields(&mut params, "expansions", &self.expansions);
        push_fields(&mut params, "user.fields", &self.user_fields);
        push_fields(&mut params, "media.fields", &self.media_fields);
        push_fields(&mut params, "place.fields", &self.place_fields);
        push_fields(&mut params, "poll.fields", &self.poll_fields);
        params
    }
}

fn push_fields(params: &mut Vec<(String, String)>, name: &str, values: &[String]) {
    if !values.is_empty() {
        params.push((name.to_string(), values.join(",")));
    }
}

/// Cloneable handle for requesting disconnection from another task.
#[derive(Clone)]
pub struct DisconnectHandle {
    running: Arc<AtomicBool>,
}

impl DisconnectHandle {
    /// Request termination. The read loop observes the flag at the next
    /// line or backoff boundary.
    pub fn disconnect(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether a session is currently active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Resets the running flag on every exit path, panics included.
struct RunningGuard {
    running: Arc<AtomicBool>,
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// How one streaming session ended, as seen by the read loop.
enum SessionEnd {
    /// Disconnect was requested; leave the whole connect loop.
    Disconnected,
    /// The server closed the stream cleanly; reconnect without touching
    /// the retry budget.
    ServerClosed,
    /// A transport fault mid-read; take the backoff path.
    Fault(StreamFault),
}

/// Stream controller for the sampled and filtered streams.
///
/// At most one session is active at a time; a second `connect` while one
/// is running fails fast with `AlreadyRunning` and opens no connection.
pub struct StreamManager {
    transport: Arc<dyn StreamTransport>,
    config: StreamConfig,
    running: Arc<AtomicBool>,
}

impl StreamManager {
    /// Create a controller over an arbitrary transport.
    pub fn new(transport: Arc<dyn StreamTransport>, config: StreamConfig) -> Self {
        Self {
            transport,
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a controller over the HTTP collaborator.
    pub fn from_api(client: ApiClient, config: StreamConfig) -> Self {
        Self::new(Arc::new(HttpTransport::new(client)), config)
    }

    /// Get a handle for disconnecting from another task.
    pub fn disconnect_handle(&self) -> DisconnectHandle {
        DisconnectHandle {
            running: self.running.clone(),
        }
    }

    /// Request termination of the active session.
    pub fn disconnect(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether a session is currently active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stream the 1% sampled firehose.
    ///
    /// Occupies the calling task until the loop terminates.
    pub async fn sample(
        &self,
        fields: &StreamFields,
        typed: bool,
        handler: &mut dyn StreamHandler,
    ) -> ChirpResult<()> {
        self.connect(constants::SAMPLE_STREAM_PATH, &fields.to_query(), typed, handler)
            .await
    }

    /// Stream tweets matching the active filter rules.
    pub async fn filter(
        &self,
        fields: &StreamFields,
        typed: bool,
        handler: &mut dyn StreamHandler,
    ) -> ChirpResult<()> {
        self.connect(constants::SEARCH_STREAM_PATH, &fields.to_query(), typed, handler)
            .await
    }

    /// Open the stream at `path` and run the session loop until
    /// disconnect, a fatal error, or retry exhaustion.
    pub async fn connect(
        &self,
        path: &str,
        params: &[(String, String)],
        typed: bool,
        handler: &mut dyn StreamHandler,
    ) -> ChirpResult<()> {
        self.transport.check_auth()?;

        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ChirpError::AlreadyRunning);
        }
        let _guard = RunningGuard {
            running: self.running.clone(),
        };

        let mut retries: u32 = 0;
        while self.running.load(Ordering::SeqCst) {
            let fault = match self.transport.open(path, params).await {
                Ok(mut conn) => {
                    if conn.status == 200 {
                        info!("stream connected to {path}");
                        retries = 0;
                        let end = self.read_session(&mut conn, typed, handler).await;
                        match end.map_err(|e| {
                            warn!("stream session failed: {e}");
                            e
                        })? {
                            SessionEnd::Disconnected => {
                                debug!("disconnect requested, leaving stream loop");
                                break;
                            }
                            SessionEnd::ServerClosed => {
                                info!("server closed the stream, reconnecting");
                                continue;
                            }
                            SessionEnd::Fault(fault) => fault,
                        }
                    } else {
                        StreamFault::Status(conn.status)
                    }
                }
                Err(e) => StreamFault::Transport(e.to_string()),
            };
            // The failed connection is dropped before the backoff sleep.

            warn!("stream attempt failed: {fault}");
            handler.on_request_error(&fault);
            retries += 1;
            let delay = self.config.backoff.delay(retries - 1);
            debug!(
                "backing off {:?} before reconnect (failure {}/{})",
                delay, retries, self.config.max_retries
            );
            sleep(delay).await;

            if retries >= self.config.max_retries {
                return Err(ChirpError::RetriesExhausted { attempts: retries });
            }
        }

        Ok(())
    }

    /// Read lines from one open connection until it ends.
    ///
    /// The running flag is observed after every dispatched line and
    /// before every body read, so a disconnect takes effect within one
    /// line's latency. Protocol errors propagate and terminate the whole
    /// connect call.
    async fn read_session(
        &self,
        conn: &mut StreamConnection,
        typed: bool,
        handler: &mut dyn StreamHandler,
    ) -> ChirpResult<SessionEnd> {
        let mut framer = LineFramer::new(self.config.chunk_size);

        loop {
            let chunk = match conn.body.next_chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => return Ok(SessionEnd::ServerClosed),
                Err(e) => return Ok(SessionEnd::Fault(StreamFault::Transport(e.to_string()))),
            };

            framer.feed(&chunk);
            while let Some(line) = framer.next_line() {
                if line.is_empty() {
                    handler.on_keep_alive();
                } else {
                    handler.on_message(dispatch::process_line(&line, typed)?);
                }
                if !self.running.load(Ordering::SeqCst) {
                    return Ok(SessionEnd::Disconnected);
                }
            }
            if !self.running.load(Ordering::SeqCst) {
                return Ok(SessionEnd::Disconnected);
            }
        }
    }
}
