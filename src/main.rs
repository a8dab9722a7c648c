//! Invocation adapter demo service.
//!
//! Serves an echo handler behind the sidecar-facing invocation pipeline.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                 INVOKE ADAPTER                    │
//!     Sidecar request    │  ┌────────┐   ┌────────┐   ┌───────────┐          │
//!     ───────────────────┼─▶│ server │──▶│  auth  │──▶│ normalize │          │
//!                        │  │+req id │   │ token  │   │ event+md  │          │
//!                        │  └────────┘   └────────┘   └─────┬─────┘          │
//!                        │                                  ▼               │
//!     Sidecar response   │  ┌──────────┐              ┌───────────┐         │
//!     ◀──────────────────┼──│ response │◀─────────────│  handler  │         │
//!                        │  │  writer  │              │ (user fn) │         │
//!                        │  └──────────┘              └───────────┘         │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use invoke_adapter::config::{load_config, ServiceConfig};
use invoke_adapter::invocation::InvocationResult;
use invoke_adapter::lifecycle::{spawn_signal_listener, Shutdown};
use invoke_adapter::observability::{init_logging, metrics};
use invoke_adapter::Service;

#[derive(Parser)]
#[command(name = "invoke-adapter")]
#[command(about = "Serve invocation handlers to a sidecar runtime", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus APP_* environment when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::from_env(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;
    tracing::info!("invoke-adapter v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth_enabled = config.auth.token().is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let mut service = Service::new(config)?;

    service.add_invocation_handler("/echo", |ctx, event| async move {
        tracing::info!(
            route = %ctx.route(),
            verb = %event.verb,
            query = %event.query_string,
            content_type = %event.content_type,
            bytes = event.data.len(),
            "Echo invoked"
        );
        Ok(Some(InvocationResult::new(event.content_type, event.data)))
    })?;
    service.add_health_check_handler("/healthz", || async { Ok(()) })?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(&shutdown);

    service.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
