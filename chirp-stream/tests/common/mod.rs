//! Shared test utilities: a scripted transport and a recording handler.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use chirp_core::error::{ChirpError, ChirpResult};
use chirp_stream::{
    DisconnectHandle, StreamBody, StreamConnection, StreamFault, StreamHandler, StreamMessage,
    StreamTransport,
};

/// One scripted body read.
pub enum MockChunk {
    /// Deliver these bytes.
    Data(&'static [u8]),
    /// Fail the read with a transport fault.
    Fault(&'static str),
    /// Block long enough that the test never sees this read complete.
    Hang,
}

/// One scripted connection attempt.
pub struct MockSession {
    pub status: u16,
    pub chunks: Vec<MockChunk>,
}

impl MockSession {
    pub fn ok(chunks: Vec<MockChunk>) -> Self {
        Self {
            status: 200,
            chunks,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            chunks: Vec::new(),
        }
    }
}

/// Transport that replays a script of sessions. Opening past the end of
/// the script is a transport fault, so runaway reconnect loops fail the
/// budget instead of spinning.
pub struct MockTransport {
    auth_ok: bool,
    sessions: Mutex<VecDeque<MockSession>>,
    opens: AtomicU32,
}

impl MockTransport {
    pub fn new(sessions: Vec<MockSession>) -> Arc<Self> {
        Arc::new(Self {
            auth_ok: true,
            sessions: Mutex::new(sessions.into()),
            opens: AtomicU32::new(0),
        })
    }

    pub fn without_credential() -> Arc<Self> {
        Arc::new(Self {
            auth_ok: false,
            sessions: Mutex::new(VecDeque::new()),
            opens: AtomicU32::new(0),
        })
    }

    /// Number of connection attempts made so far.
    pub fn opens(&self) -> u32 {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamTransport for MockTransport {
    fn check_auth(&self) -> ChirpResult<()> {
        if self.auth_ok {
            Ok(())
        } else {
            Err(ChirpError::AuthRequired)
        }
    }

    async fn open(
        &self,
        _path: &str,
        _params: &[(String, String)],
    ) -> ChirpResult<StreamConnection> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let session = self
            .sessions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ChirpError::Transport("mock script exhausted".into()))?;
        Ok(StreamConnection {
            status: session.status,
            body: Box::new(MockBody {
                chunks: session.chunks.into(),
            }),
        })
    }
}

struct MockBody {
    chunks: VecDeque<MockChunk>,
}

#[async_trait]
impl StreamBody for MockBody {
    async fn next_chunk(&mut self) -> ChirpResult<Option<Bytes>> {
        match self.chunks.pop_front() {
            None => Ok(None),
            Some(MockChunk::Data(data)) => Ok(Some(Bytes::copy_from_slice(data))),
            Some(MockChunk::Fault(detail)) => Err(ChirpError::Transport(detail.into())),
            Some(MockChunk::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(None)
            }
        }
    }
}

/// What the recording handler observed, in callback order.
#[derive(Debug, Clone)]
pub enum Recorded {
    Message(String),
    KeepAlive,
    Fault(StreamFault),
}

/// Handler that records every callback and can request disconnection
/// after a fixed number of messages.
pub struct RecordingHandler {
    pub events: Vec<Recorded>,
    disconnect_after: Option<(usize, DisconnectHandle)>,
    messages_seen: usize,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            disconnect_after: None,
            messages_seen: 0,
        }
    }

    /// Disconnect via `handle` once `count` messages have been observed.
    pub fn disconnect_after(count: usize, handle: DisconnectHandle) -> Self {
        Self {
            events: Vec::new(),
            disconnect_after: Some((count, handle)),
            messages_seen: 0,
        }
    }

    pub fn message_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Recorded::Message(_)))
            .count()
    }

    pub fn keep_alive_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Recorded::KeepAlive))
            .count()
    }

    pub fn fault_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Recorded::Fault(_)))
            .count()
    }
}

impl StreamHandler for RecordingHandler {
    fn on_message(&mut self, message: StreamMessage) {
        let rendered = match &message {
            StreamMessage::Tweet(tweet) => format!("tweet:{}", tweet.id),
            StreamMessage::Raw(value) => value.to_string(),
        };
        self.events.push(Recorded::Message(rendered));
        self.messages_seen += 1;
        if let Some((count, ref handle)) = self.disconnect_after {
            if self.messages_seen >= count {
                handle.disconnect();
            }
        }
    }

    fn on_keep_alive(&mut self) {
        self.events.push(Recorded::KeepAlive);
    }

    fn on_request_error(&mut self, fault: &StreamFault) {
        self.events.push(Recorded::Fault(fault.clone()));
    }
}
