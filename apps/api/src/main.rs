mod config;
mod db;
mod errors;
mod keywords;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::keywords::seed::seed_defaults;
use crate::routes::build_router;
use crate::screening::extract::FileTextExtractor;
use crate::screening::workspace::Workspace;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (falls back to sensible defaults)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shortlist API v{}", env!("CARGO_PKG_VERSION"));

    // Open the keyword store and make sure schema + seed data exist.
    // The pool is passed explicitly through AppState from here on; there is
    // no ambient global connection.
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;
    seed_defaults(&db).await?;

    // Default document text extractor (extension-dispatched, best-effort)
    let extractor = Arc::new(FileTextExtractor);

    // The recruiter's working set: loaded documents, match results, selection
    let workspace = Arc::new(RwLock::new(Workspace::default()));

    // Build app state
    let state = AppState {
        db,
        extractor,
        workspace,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
