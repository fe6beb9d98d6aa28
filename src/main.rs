use anyhow::{Context, Result};
use catalog_translations::api::{self, AppState};
use catalog_translations::catalog::InMemoryCatalog;
use catalog_translations::config::Config;
use catalog_translations::translation::DisplayMode;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog_translations=info".parse()?),
        )
        .init();

    info!("Starting catalog translations service");

    // Load configuration from environment
    let config = Config::from_env()?;

    let catalog = Arc::new(InMemoryCatalog::load(&config.catalog_path)?);
    let mode = DisplayMode::from_full_term_projection(config.full_term_projection);
    info!("Term display mode: {:?}", mode);

    let app = api::router(AppState::new(catalog, mode));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
