use playlist_generator::config::Config;
use playlist_generator::llm::LlmClient;
use playlist_generator::playlist::PlaylistGenerator;
use playlist_generator::server::PlaylistServer;
use playlist_generator::spotify::SpotifyClient;
use rmcp::{transport::stdio, ServiceExt};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging. Stdout carries the MCP protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let llm_client = LlmClient::new(&config)?;
    let spotify_client = SpotifyClient::new(&config)?;
    let generator = PlaylistGenerator::new(Arc::new(llm_client), Arc::new(spotify_client));

    let service = PlaylistServer::new(generator)
        .serve(stdio())
        .await
        .map_err(|e| {
            error!("Error connecting to server: {}", e);
            e
        })?;
    info!("Server started");

    service.waiting().await?;
    info!("Server stopped");

    Ok(())
}
