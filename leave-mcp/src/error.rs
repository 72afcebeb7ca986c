//! Error types for the Leave MCP server

use thiserror::Error;

use leave_core::LedgerError;

/// Result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;

/// Errors that can occur in the MCP server
#[derive(Error, Debug)]
pub enum McpError {
    /// Frame is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Frame is JSON but not a JSON-RPC request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// JSON-RPC method is not supported
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Call frame names a tool that is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments do not match the tool's input schema
    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// Invalid parameters for a protocol method
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Resource URI does not resolve
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// No live session with this id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Session exists but no longer accepts frames
    #[error("Session closed: {0}")]
    SessionClosed(String),

    /// Stream read or write failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Ledger error
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl McpError {
    /// Get error code for MCP protocol
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::Parse(_) => -32700,
            McpError::InvalidRequest(_) => -32600,
            McpError::MethodNotFound(_) => -32601,
            McpError::UnknownTool(_) => -32602,
            McpError::InvalidArguments { .. } => -32602,
            McpError::InvalidParams(_) => -32602,
            McpError::ResourceNotFound(_) => -32002,
            McpError::SessionNotFound(_) => -32003,
            McpError::SessionClosed(_) => -32004,
            McpError::Serialization(_) => -32700,
            _ => -32603,
        }
    }

    /// Whether this error ends the session it occurred in
    pub fn is_fatal_to_session(&self) -> bool {
        matches!(self, McpError::Transport(_) | McpError::Io(_))
    }
}
