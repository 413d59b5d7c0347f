use anyhow::Result;
use ascii_oracle::api;
use ascii_oracle::models::Config;
use ascii_oracle::state::AppState;
use clap::Parser;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "ascii-oracle")]
#[command(about = "Serve ASCII art and streamed definitions for a topic")]
struct CliArgs {
    /// Port to listen on; overrides the PORT environment variable.
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
}

fn resolve_port(cli_port: Option<u16>, config_port: u16) -> u16 {
    cli_port.unwrap_or(config_port)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ascii_oracle=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env();

    if config.gemini_api_key.is_empty() {
        // Not fatal by design: requests will fail downstream with a 500.
        error!("GEMINI_API_KEY is not set; model requests will fail");
    }

    let state = AppState::from_config(&config);
    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port(args.port, config.port)));
    info!("Starting ascii-oracle on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
