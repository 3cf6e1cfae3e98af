mod bookmarks;
mod config;
mod errors;
mod links;
mod matching;
mod models;
mod resume;
mod routes;
mod search;
mod sources;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::matching::ReferenceData;
use crate::routes::build_router;
use crate::sources::{CachedJobSource, JobSource, RemotiveSource};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (invalid values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Finder API v{}", env!("CARGO_PKG_VERSION"));

    // Reference tables: built-in unless a JSON file is configured
    let reference = match &config.reference_data_path {
        Some(path) => {
            let data = ReferenceData::load(path)?;
            info!("Loaded reference data from {}", path.display());
            data
        }
        None => ReferenceData::default(),
    };

    // Job source: Remotive behind a process-wide TTL cache
    let remotive = RemotiveSource::new(
        config.job_source_url.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    )?;
    let job_source: Arc<dyn JobSource> = Arc::new(CachedJobSource::new(
        Arc::new(remotive),
        Duration::from_secs(config.cache_ttl_secs),
    ));
    info!(
        "Job source: {} (timeout {}s, cache {}s)",
        config.job_source_url, config.fetch_timeout_secs, config.cache_ttl_secs
    );

    info!("Scoring policy: {}", config.scoring_policy);
    let state = AppState::new(config.clone(), reference, job_source);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
