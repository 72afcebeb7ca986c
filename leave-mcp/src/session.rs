//! Session registry for transports with out-of-band delivery
//!
//! With SSE the outbound stream is the long-lived response and inbound frames
//! arrive as separate HTTP posts. The manager maps a session id onto the
//! inbound channel of the bridge serving that session.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{McpError, McpResult};

/// Default number of inbound frames buffered per session
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Public view of a live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub opened_at: DateTime<Utc>,
}

/// Everything the transport needs to start a bridge for a new session
pub struct OpenedSession {
    pub session_id: String,
    pub inbound: mpsc::Receiver<String>,
    pub cancel: CancellationToken,
}

struct SessionEntry {
    opened_at: DateTime<Utc>,
    inbound: mpsc::Sender<String>,
    cancel: CancellationToken,
}

/// Manages all live sessions
pub struct SessionManager {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    channel_capacity: usize,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Set the per-session inbound buffer size
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Register a new session
    pub fn open_session(&self) -> McpResult<OpenedSession> {
        let session_id = Uuid::new_v4().simple().to_string();
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let cancel = CancellationToken::new();

        let mut sessions = self.sessions.write()
            .map_err(|_| McpError::Internal("Lock poisoned".to_string()))?;

        sessions.insert(session_id.clone(), SessionEntry {
            opened_at: Utc::now(),
            inbound: tx,
            cancel: cancel.clone(),
        });

        info!(%session_id, active = sessions.len(), "Session registered");

        Ok(OpenedSession {
            session_id,
            inbound: rx,
            cancel,
        })
    }

    /// Queue an inbound frame for a session
    pub async fn deliver(&self, session_id: &str, frame: String) -> McpResult<()> {
        // Clone the sender so the lock is not held across the await
        let sender = {
            let sessions = self.sessions.read()
                .map_err(|_| McpError::Internal("Lock poisoned".to_string()))?;

            sessions.get(session_id)
                .map(|entry| entry.inbound.clone())
                .ok_or_else(|| McpError::SessionNotFound(session_id.to_string()))?
        };

        sender.send(frame).await
            .map_err(|_| McpError::SessionClosed(session_id.to_string()))?;

        debug!(%session_id, "Frame delivered");
        Ok(())
    }

    /// Cancel a session and forget it
    pub fn close_session(&self, session_id: &str) -> McpResult<()> {
        let entry = {
            let mut sessions = self.sessions.write()
                .map_err(|_| McpError::Internal("Lock poisoned".to_string()))?;

            sessions.remove(session_id)
                .ok_or_else(|| McpError::SessionNotFound(session_id.to_string()))?
        };

        entry.cancel.cancel();
        info!(%session_id, "Session unregistered");
        Ok(())
    }

    /// Get a session
    pub fn get_session(&self, session_id: &str) -> McpResult<SessionInfo> {
        let sessions = self.sessions.read()
            .map_err(|_| McpError::Internal("Lock poisoned".to_string()))?;

        sessions.get(session_id)
            .map(|entry| SessionInfo {
                session_id: session_id.to_string(),
                opened_at: entry.opened_at,
            })
            .ok_or_else(|| McpError::SessionNotFound(session_id.to_string()))
    }

    /// Ids of all live sessions
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions
            .read()
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of live sessions
    pub fn active_sessions(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Cancel every session (server shutdown)
    pub fn close_all(&self) {
        if let Ok(mut sessions) = self.sessions.write() {
            for (_, entry) in sessions.drain() {
                entry.cancel.cancel();
            }
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
