//! Out-of-band message delivery

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use leave_mcp::McpError;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::AppState;

/// Query string of a message post
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub session_id: Option<String>,
}

/// Deliver one JSON-RPC frame to a live session.
///
/// The answer arrives on the session's SSE stream, not in this response.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    let session_id = query
        .session_id
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "session_id is required".to_string()))?;

    Uuid::parse_str(&session_id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))?;

    serde_json::from_str::<Value>(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Could not parse message: {}", e)))?;

    state
        .sessions
        .deliver(&session_id, body)
        .await
        .map_err(|e| match e {
            McpError::SessionNotFound(_) | McpError::SessionClosed(_) => {
                tracing::warn!(%session_id, "Message for unknown session");
                (StatusCode::NOT_FOUND, "Could not find session".to_string())
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        })?;

    Ok((StatusCode::ACCEPTED, "Accepted"))
}

/// Describe the messages endpoint
pub async fn messages_docs() -> &'static str {
    "POST JSON-RPC messages here with ?session_id=<id> from the /sse endpoint event. \
Responses are delivered on the SSE stream."
}
