//! Leave Server Binary
//!
//! Serves the Leave Manager MCP tools over SSE.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (127.0.0.1:8000)
//! leave-server
//!
//! # Custom bind address
//! HOST=0.0.0.0 PORT=3000 leave-server
//! leave-server --host 0.0.0.0 --port 3000
//!
//! # With custom seed records
//! LEAVE_SEED_FILE=./employees.json leave-server
//! ```

use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use leave_core::{InMemoryLedger, LedgerBackend};
use leave_mcp::seed_from_env;
use leave_server::{LeaveServer, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "leave-server", version, about = "Leave Manager MCP server over SSE")]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Disable permissive CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leave_server=info,leave_mcp=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let ledger = Arc::new(InMemoryLedger::from_seed(seed_from_env()?));
    tracing::info!(
        "Ledger ({}) ready with employees: {:?}",
        ledger.name(),
        ledger.employee_ids()?
    );

    let config = ServerConfig::builder()
        .host(args.host)
        .port(args.port)
        .cors(!args.no_cors)
        .build();

    tracing::info!("Starting Leave Server v{}", env!("CARGO_PKG_VERSION"));

    let server = LeaveServer::new(ledger, config);
    server.run().await?;

    Ok(())
}
