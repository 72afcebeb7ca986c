//! Session bridge
//!
//! One bridge drives one client session: it reads a frame, hands it to the
//! [`McpServer`], writes the response, and only then reads the next frame.
//! Response N therefore always answers call N; there is no pipelining and
//! frames carry no extra correlation data beyond the JSON-RPC id.
//!
//! ```text
//! Connecting ──► Open ──► Closing ──► Closed
//!                 │  ▲
//!                 ▼  │ one frame at a time
//!               handle_frame
//! ```
//!
//! The session closes on end of input, on cancellation, or on a read/write
//! failure. Failures never propagate beyond the session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::server::McpServer;
use crate::transport::{FrameSink, FrameSource};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// Why a session ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Client finished sending
    EndOfStream,
    /// Connection dropped or server shutting down
    Cancelled,
    /// Read or write failed
    Transport(String),
}

/// Final report of a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub frames_handled: u64,
    pub close_reason: CloseReason,
}

pub struct SessionBridge {
    session_id: String,
    server: Arc<McpServer>,
    state: SessionState,
    frames_handled: u64,
}

impl SessionBridge {
    /// Create a bridge with a fresh session id
    pub fn new(server: Arc<McpServer>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            server,
            state: SessionState::Connecting,
            frames_handled: 0,
        }
    }

    /// Use an id allocated elsewhere (e.g. by the session manager)
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Serve the session until it closes.
    ///
    /// `cancel` unblocks a pending read immediately. A write already in
    /// progress is allowed to finish before the session closes.
    pub async fn run<S, K>(
        &mut self,
        mut source: S,
        mut sink: K,
        cancel: CancellationToken,
    ) -> SessionSummary
    where
        S: FrameSource,
        K: FrameSink,
    {
        self.state = SessionState::Open;
        info!(session_id = %self.session_id, "Session open");

        let close_reason = loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => break CloseReason::Cancelled,
                next = source.next_frame() => next,
            };

            let frame = match next {
                Ok(Some(frame)) => frame,
                Ok(None) => break CloseReason::EndOfStream,
                Err(e) if e.is_fatal_to_session() => {
                    warn!(session_id = %self.session_id, "Read failed: {}", e);
                    break CloseReason::Transport(e.to_string());
                }
                Err(e) => {
                    warn!(session_id = %self.session_id, "Skipping unreadable frame: {}", e);
                    continue;
                }
            };

            self.frames_handled += 1;
            debug!(session_id = %self.session_id, frame = %frame, "Inbound frame");

            let response = match self.server.handle_frame(&frame) {
                Ok(Some(response)) => response,
                Ok(None) => continue,
                Err(e) => {
                    error!(session_id = %self.session_id, "Failed to encode response: {}", e);
                    continue;
                }
            };

            match sink.send_frame(response).await {
                Ok(()) => {}
                Err(e) if e.is_fatal_to_session() => {
                    warn!(session_id = %self.session_id, "Write failed: {}", e);
                    break CloseReason::Transport(e.to_string());
                }
                Err(e) => warn!(session_id = %self.session_id, "Response dropped: {}", e),
            }
        };

        self.state = SessionState::Closing;
        if let Err(e) = sink.close().await {
            debug!(session_id = %self.session_id, "Close failed: {}", e);
        }
        self.state = SessionState::Closed;

        info!(
            session_id = %self.session_id,
            frames = self.frames_handled,
            reason = ?close_reason,
            "Session closed"
        );

        SessionSummary {
            session_id: self.session_id.clone(),
            frames_handled: self.frames_handled,
            close_reason,
        }
    }
}
