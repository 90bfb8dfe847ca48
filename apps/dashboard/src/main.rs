use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

use tricount_client::UpstreamConfig;
use tricount_dashboard::{AppState, router};

#[derive(Parser, Debug)]
struct Args {
    /// Address to bind the dashboard API on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,
    /// JSON file holding the remembered tricount keys.
    #[arg(long, default_value = "data/tricount-keys.json")]
    keys_file: PathBuf,
    /// Override the upstream registry base URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args
        .base_url
        .map_or_else(UpstreamConfig::default, UpstreamConfig::new);
    let state = AppState::new(config, args.keys_file);

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    tracing::info!(addr = %listener.local_addr()?, "tricount dashboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
