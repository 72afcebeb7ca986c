//! Leave Server - SSE transport for the Leave Manager
//!
//! Exposes the MCP server over HTTP using the SSE transport:
//!
//! - `GET /sse` opens a session. The first event (`endpoint`) tells the
//!   client where to post; every response frame then arrives as a `message`
//!   event on the same stream.
//! - `POST /messages/?session_id=...` delivers one inbound JSON-RPC frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    LeaveServer                      │
//! │                                                     │
//! │   GET /sse ──► SessionManager ──► SessionBridge     │
//! │                     ▲                 │             │
//! │   POST /messages/ ──┘                 ▼             │
//! │                              leave-mcp::McpServer   │
//! │                                       │             │
//! │                              leave-core ledger      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The server holds no protocol logic; it only moves frames between HTTP
//! and the session bridge.

mod config;
pub mod routes;

pub use config::{ServerConfig, ServerConfigBuilder};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use leave_core::LedgerBackend;
use leave_mcp::{McpServer, SessionManager};

/// Shared application state
pub struct AppState {
    /// Protocol handler shared by every session
    pub server: Arc<McpServer>,
    /// Live SSE sessions
    pub sessions: Arc<SessionManager>,
    /// The ledger behind the tools
    pub ledger: Arc<dyn LedgerBackend>,
    /// Outbound frames buffered per SSE stream
    pub channel_capacity: usize,
}

impl AppState {
    /// Create new app state over the given ledger
    pub fn new(ledger: Arc<dyn LedgerBackend>, config: &ServerConfig) -> Self {
        Self {
            server: Arc::new(McpServer::new(Arc::clone(&ledger))),
            sessions: Arc::new(
                SessionManager::new().with_channel_capacity(config.channel_capacity),
            ),
            ledger,
            channel_capacity: config.channel_capacity,
        }
    }
}

/// Leave Manager HTTP server
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use leave_core::{InMemoryLedger, SeedData};
/// use leave_server::{LeaveServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let ledger = Arc::new(InMemoryLedger::from_seed(SeedData::reference()));
///     let server = LeaveServer::new(ledger, ServerConfig::default());
///     server.run().await.unwrap();
/// }
/// ```
pub struct LeaveServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl LeaveServer {
    /// Create a new server over the given ledger
    pub fn new(ledger: Arc<dyn LedgerBackend>, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(ledger, &config)),
            config,
        }
    }

    /// Build the Axum router with all routes
    pub fn router(&self) -> Router {
        routes::create_router(Arc::clone(&self.state), self.config.cors_enabled)
    }

    /// Get the socket address for the server
    pub fn addr(&self) -> SocketAddr {
        self.config.addr()
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Run the server until Ctrl-C
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = self.addr();

        tracing::info!("Leave Server listening on http://{}", addr);
        tracing::info!("Endpoints:");
        tracing::info!("  GET  /health");
        tracing::info!("  GET  /sse");
        tracing::info!("  POST /messages/?session_id=<id>");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let sessions = Arc::clone(&self.state.sessions);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down, closing {} session(s)", sessions.active_sessions());
                sessions.close_all();
            })
            .await?;

        Ok(())
    }
}
