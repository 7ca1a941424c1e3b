mod analysis;
mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod state;
mod store;
mod students;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::seed::sample_catalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemorySkillStore, PgSkillStore, SkillStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Gap API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize storage: PostgreSQL (runs migrations) or the in-memory store
    let store: Arc<dyn SkillStore> = match &config.database_url {
        Some(url) => {
            let db = create_pool(url, config.db_max_connections).await?;
            Arc::new(PgSkillStore::new(db))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store (data is lost on exit)");
            Arc::new(MemorySkillStore::new())
        }
    };

    if config.seed_catalog {
        store.load_seed(&sample_catalog()).await?;
    }

    info!(
        "Gap analyzer configured with {} resources per gap",
        config.resources_per_gap
    );

    let state = AppState::new(store, &config);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
