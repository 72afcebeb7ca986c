//! Leave MCP Server Binary
//!
//! Serves a single MCP session over stdin/stdout.
//!
//! ## Usage
//!
//! ```bash
//! # Run as MCP server (stdio)
//! leave-mcp-server
//!
//! # With custom seed records
//! LEAVE_SEED_FILE=./employees.json leave-mcp-server
//! ```

use std::sync::Arc;

use leave_core::{InMemoryLedger, LedgerBackend};
use leave_mcp::{seed_from_env, LineSink, LineSource, McpServer, SessionBridge};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (to stderr so it doesn't interfere with stdio MCP)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leave_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Leave MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let ledger = Arc::new(InMemoryLedger::from_seed(seed_from_env()?));
    tracing::info!("Ledger ready with employees: {:?}", ledger.employee_ids()?);

    let server = Arc::new(McpServer::new(ledger));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, closing session");
            on_signal.cancel();
        }
    });

    let source = LineSource::new(BufReader::new(tokio::io::stdin()));
    let sink = LineSink::new(tokio::io::stdout());

    tracing::info!("MCP server ready, listening on stdio");
    let summary = SessionBridge::new(server).run(source, sink, cancel).await;
    tracing::info!(
        "Handled {} frame(s), closed: {:?}",
        summary.frames_handled,
        summary.close_reason
    );

    Ok(())
}
