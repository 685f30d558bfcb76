use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use bulletin_runtime_config::{ApiKey, BulletinConfig};
use bulletin_server::{build_app, AppState};
use bulletin_summary::{GenerationClient, OpenAiChat, Orchestrator};

/// Serve the newsletter summarizer.
#[derive(Parser)]
#[command(name = "bulletin-server", version)]
struct Cli {
    /// Config file (defaults to the platform config dir's bulletin.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overriding `[server].bind`
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bulletin_server=info,bulletin_summary=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = BulletinConfig::resolve(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let api_key = ApiKey::from_env()?;
    let backend = OpenAiChat::new(&config.generation, api_key)?;
    tracing::info!(
        model = %config.generation.model,
        endpoint = backend.endpoint(),
        "generation backend ready"
    );
    let orchestrator = Orchestrator::new(GenerationClient::new(Arc::new(backend)));

    let bind = config.server.bind.clone();
    let app = build_app(AppState::new(orchestrator, config.server));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    tracing::info!("starting server at http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
    }
    tracing::info!("shutting down");
}
