use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use reelmatch_api::{
    config::Config,
    data::load_artifacts,
    routes::{create_router, AppState},
    services::{providers::TmdbPosterResolver, Recommender},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // The service cannot do anything useful without both artifacts
    let (catalog, similarity) = load_artifacts(&config.catalog_path, &config.similarity_path)
        .context("Model files not found or unreadable. Please run the data processing notebook first")?;

    let posters = TmdbPosterResolver::from_config(&config)?;
    let recommender = Recommender::new(Arc::new(catalog), Arc::new(similarity), Arc::new(posters));

    let app = create_router(AppState::new(recommender));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
