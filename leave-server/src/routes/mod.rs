//! HTTP route handlers

mod messages;
mod sse;

use std::sync::Arc;

use axum::{extract::State, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use leave_core::LedgerBackend;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub use messages::MessageQuery;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
    pub employees: usize,
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, employees) = match state.ledger.employee_ids() {
        Ok(ids) => ("healthy", ids.len()),
        Err(e) => {
            tracing::warn!("Ledger unhealthy: {}", e);
            ("degraded", 0)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.active_sessions(),
        employees,
    })
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>, cors_enabled: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/sse", get(sse::handle_sse))
        .route("/messages", get(messages::messages_docs).post(messages::post_message))
        .route("/messages/", post(messages::post_message))
        .with_state(state);

    let router = if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
