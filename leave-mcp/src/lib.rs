//! Leave MCP Server Library
//!
//! This crate implements the Model Context Protocol (MCP) server for the
//! leave ledger, letting clients check balances and apply for leave through
//! standardized tools.
//!
//! ## Architecture
//!
//! ```text
//! Client (agent, IDE, ...)
//!        │  JSON-RPC frames
//!        ▼
//! ┌─────────────────────┐
//! │  Transport          │  stdio lines, or SSE + POST (leave-server)
//! └─────────┬───────────┘
//!           ▼
//! ┌─────────────────────┐
//! │  SessionBridge      │ ◄── one per connection, one frame at a time
//! │                     │
//! │  ┌───────────────┐  │
//! │  │   McpServer   │  │
//! │  │               │  │
//! │  │  Tools        │  │ - get_leave_balance
//! │  │               │  │ - apply_leave
//! │  │               │  │ - get_leave_history
//! │  │               │  │ - get_greeting
//! │  │  Resources    │  │ - greeting://{name}
//! │  └───────────────┘  │
//! └─────────┬───────────┘
//!           ▼
//! ┌─────────────────────┐
//! │  leave-core ledger  │  shared by all sessions
//! └─────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use leave_core::{InMemoryLedger, SeedData};
//! use leave_mcp::{McpServer, SessionBridge, LineSink, LineSource};
//! use tokio_util::sync::CancellationToken;
//!
//! let ledger = Arc::new(InMemoryLedger::from_seed(SeedData::reference()));
//! let server = Arc::new(McpServer::new(ledger));
//!
//! let source = LineSource::new(tokio::io::BufReader::new(tokio::io::stdin()));
//! let sink = LineSink::new(tokio::io::stdout());
//! SessionBridge::new(server).run(source, sink, CancellationToken::new()).await;
//! ```

pub mod bridge;
pub mod error;
pub mod resources;
pub mod server;
pub mod session;
pub mod tools;
pub mod transport;

pub use bridge::{CloseReason, SessionBridge, SessionState, SessionSummary};
pub use error::{McpError, McpResult};
pub use server::{MCPRequest, MCPResponse, McpServer};
pub use session::{OpenedSession, SessionInfo, SessionManager};
pub use tools::{LeaveTool, ToolCall, ToolRegistry, ToolResult};
pub use transport::{ChannelSink, ChannelSource, FrameSink, FrameSource, LineSink, LineSource};

/// Server metadata for MCP protocol
pub const SERVER_NAME: &str = "LeaveManager";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_INSTRUCTIONS: &str = "Leave management tools. Check an employee's remaining leave \
with get_leave_balance, book dates with apply_leave, and list past leave with get_leave_history.";

/// Environment variable naming a JSON seed file for the ledger
pub const SEED_FILE_ENV: &str = "LEAVE_SEED_FILE";

/// Seed data from `LEAVE_SEED_FILE`, or the reference records when unset
pub fn seed_from_env() -> leave_core::Result<leave_core::SeedData> {
    match std::env::var(SEED_FILE_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            tracing::info!("Loading ledger seed from {}", path);
            leave_core::SeedData::from_file(path)
        }
        _ => Ok(leave_core::SeedData::reference()),
    }
}
