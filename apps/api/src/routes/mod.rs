pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::keywords::handlers as keywords;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Keyword store
        .route(
            "/api/v1/categories",
            get(keywords::handle_list_categories).post(keywords::handle_create_category),
        )
        .route(
            "/api/v1/categories/:id/keywords",
            get(keywords::handle_list_keywords),
        )
        .route(
            "/api/v1/keywords",
            post(keywords::handle_add_keyword).delete(keywords::handle_delete_keyword),
        )
        // Document working set
        .route(
            "/api/v1/documents",
            get(screening::handle_list_documents).post(screening::handle_load_documents),
        )
        .route("/api/v1/documents/shuffle", post(screening::handle_shuffle))
        .route("/api/v1/documents/preview", get(screening::handle_preview))
        .route(
            "/api/v1/documents/analysis",
            get(screening::handle_analysis),
        )
        // Screening
        .route("/api/v1/screen", post(screening::handle_screen))
        // Selection + export
        .route(
            "/api/v1/selection",
            get(screening::handle_get_selection)
                .post(screening::handle_select)
                .delete(screening::handle_deselect),
        )
        .route(
            "/api/v1/selection/auto",
            post(screening::handle_auto_select),
        )
        .route("/api/v1/export", post(screening::handle_export))
        .with_state(state)
}
