use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::screening::extract::TextExtractor;
use crate::screening::workspace::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Pluggable document text extractor. Default: FileTextExtractor,
    /// dispatching on file extension. Swap for other document sources.
    pub extractor: Arc<dyn TextExtractor>,
    /// The recruiter's working set: loaded documents, the match results of
    /// the latest filter run, and the ordered candidate selection.
    pub workspace: Arc<RwLock<Workspace>>,
}
