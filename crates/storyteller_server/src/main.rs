use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use storyteller_server::{
    AppConfig, AppState, build_pipeline, create_router, init_logging, spawn_audio_cleanup,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Storyteller image narration server", long_about = None)]
struct Args {
    /// Extra configuration file, layered over the discovered ones
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log filter when RUST_LOG is unset (overrides logging.level)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if args.json_logs {
        config.logging.json = true;
    }

    init_logging(&config.logging)?;

    let pipeline = Arc::new(build_pipeline(&config)?);
    let cleanup = spawn_audio_cleanup(pipeline.audio_store().clone(), &config.audio);
    let router = create_router(
        AppState::new(pipeline.clone()),
        config.server.max_upload_bytes,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(address = %addr, "Storyteller server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    if let Some(handle) = cleanup {
        handle.abort();
    }

    Ok(())
}
