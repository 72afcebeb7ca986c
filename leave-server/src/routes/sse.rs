//! SSE session stream

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use leave_mcp::{ChannelSink, ChannelSource, SessionBridge};
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt as _};
use tracing::{debug, info};

use crate::AppState;

/// Open a session and stream its response frames.
///
/// The stream starts with an `endpoint` event naming the URL to post frames
/// to. Dropping the stream (client gone) cancels the session.
pub async fn handle_sse(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, String)> {
    let opened = state
        .sessions
        .open_session()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let session_id = opened.session_id.clone();
    let (out_tx, out_rx) = mpsc::channel::<String>(state.channel_capacity);
    let disconnect_guard = opened.cancel.clone().drop_guard();

    let server = Arc::clone(&state.server);
    let sessions = Arc::clone(&state.sessions);
    tokio::spawn(async move {
        let summary = SessionBridge::new(server)
            .with_session_id(opened.session_id)
            .run(
                ChannelSource::new(opened.inbound),
                ChannelSink::new(out_tx),
                opened.cancel,
            )
            .await;

        // Already unregistered when closed through the manager
        if sessions.close_session(&summary.session_id).is_err() {
            debug!(session_id = %summary.session_id, "Session was already unregistered");
        }
    });

    info!(%session_id, "SSE client connected");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages/?session_id={}", session_id));

    let frames = ReceiverStream::new(out_rx).map(move |frame| {
        let _guard = &disconnect_guard;
        Ok::<_, Infallible>(Event::default().event("message").data(frame))
    });

    let stream = tokio_stream::once(Ok::<_, Infallible>(endpoint)).chain(frames);

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
