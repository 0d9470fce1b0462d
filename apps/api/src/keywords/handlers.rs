//! Axum route handlers for the keyword store API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::keywords::models::CategoryRow;
use crate::keywords::store;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCategoryResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddKeywordRequest {
    pub keyword: String,
    pub category_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AddKeywordResponse {
    /// False when the keyword text already existed anywhere in the store.
    pub added: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteKeywordRequest {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteKeywordResponse {
    pub deleted: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/categories
pub async fn handle_list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryRow>>, AppError> {
    Ok(Json(store::list_categories(&state.db).await?))
}

/// POST /api/v1/categories
pub async fn handle_create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CreateCategoryResponse>), AppError> {
    let id = store::create_category(&state.db, &request.name, request.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(CreateCategoryResponse { id })))
}

/// GET /api/v1/categories/:id/keywords
///
/// Keyword texts of one category, sorted lexicographically.
pub async fn handle_list_keywords(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<String>>, AppError> {
    if !store::category_exists(&state.db, category_id).await? {
        return Err(AppError::NotFound(format!(
            "Category {category_id} not found"
        )));
    }
    Ok(Json(store::list_keywords(&state.db, category_id).await?))
}

/// POST /api/v1/keywords
///
/// Insert is ignore-on-conflict: a keyword text that already exists anywhere
/// in the store leaves it unchanged, reported via `added: false`.
pub async fn handle_add_keyword(
    State(state): State<AppState>,
    Json(request): Json<AddKeywordRequest>,
) -> Result<Json<AddKeywordResponse>, AppError> {
    if !store::category_exists(&state.db, request.category_id).await? {
        return Err(AppError::NotFound(format!(
            "Category {} not found",
            request.category_id
        )));
    }
    let added = store::add_keyword(&state.db, &request.keyword, request.category_id).await?;
    Ok(Json(AddKeywordResponse { added }))
}

/// DELETE /api/v1/keywords
///
/// Deletes by keyword text. Deleting a keyword that does not exist is a
/// silent no-op.
pub async fn handle_delete_keyword(
    State(state): State<AppState>,
    Json(request): Json<DeleteKeywordRequest>,
) -> Result<Json<DeleteKeywordResponse>, AppError> {
    let deleted = store::delete_keyword(&state.db, &request.keyword).await?;
    Ok(Json(DeleteKeywordResponse { deleted }))
}
