mod acquire;
mod analysis;
mod config;
mod courses;
mod errors;
mod routes;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::courses::catalog::Platform;
use crate::courses::CourseCatalog;
use crate::routes::build_router;
use crate::skills::SkillVocabulary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary: built-in list unless a file is configured
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => SkillVocabulary::from_file(path)
            .with_context(|| format!("Failed to load skill vocabulary from {}", path.display()))?,
        None => SkillVocabulary::default_skills().context("Failed to build default skill vocabulary")?,
    };
    info!("Skill vocabulary ready ({} skills)", vocabulary.len());

    // Course catalogs: missing files or columns abort startup
    let catalog = CourseCatalog::load(&config.coursera_catalog_path, &config.udemy_catalog_path)
        .await
        .context("Failed to load course catalogs")?;
    if catalog.is_empty() {
        warn!("Both course catalogs are empty; no courses will be suggested");
    }
    for platform in Platform::PRIORITY {
        if catalog.len(platform) == 0 {
            warn!("{platform} catalog is empty");
        }
    }

    let state = AppState {
        config: config.clone(),
        vocabulary: Arc::new(vocabulary),
        catalog: Arc::new(catalog),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
