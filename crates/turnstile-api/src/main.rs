//! CLI entry point for the Turnstile API server.

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use turnstile_api::config::{load_api_config, load_graph_config};
use turnstile_api::routes::router;
use turnstile_api::state::AppState;
use turnstile_graph::GraphClient;

#[derive(Parser)]
#[command(name = "turnstile-api")]
#[command(about = "HTTP API for the Turnstile check-in graph")]
struct Cli {
    /// Config file prefix (default: turnstile).
    #[arg(short, long, default_value = "turnstile")]
    config: String,

    /// Override the listen port from configuration.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let mut api_config = load_api_config(&cli.config)?;
    if let Some(port) = cli.port {
        api_config.port = port;
    }

    // One process-wide graph client; every handler shares it via AppState.
    let graph_config = load_graph_config(&cli.config);
    let graph = GraphClient::connect(&graph_config).await?;

    let app = router(AppState { graph });

    let addr = api_config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Turnstile API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete, graph connection released");
    Ok(())
}

/// Resolves when ctrl-c arrives; axum then drains in-flight requests.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
