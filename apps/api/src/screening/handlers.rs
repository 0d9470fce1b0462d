//! Axum route handlers for the screening API: the document working set,
//! keyword filtering, candidate selection, and report export.

use std::collections::HashMap;
use std::path::Path;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::keywords::store;
use crate::screening::export::{build_row, file_name_of, preview_of, write_report, ReportFormat};
use crate::screening::matching::{aggregate_score, compute_matches, find_context, KeywordCount};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Pass threshold applied when a request does not set one.
fn default_threshold() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct LoadDocumentsRequest {
    pub paths: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LoadDocumentsResponse {
    pub loaded: usize,
}

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub path: String,
    pub file_name: String,
    /// Aggregate match score from the latest filter run; absent until the
    /// document has been screened.
    pub score: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    /// Explicit keyword list, used verbatim (order preserved, no dedup).
    pub keywords: Option<Vec<String>>,
    /// Alternatively, screen with a stored category's keywords
    /// (sorted lexicographically).
    pub category_id: Option<i64>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

#[derive(Debug, Serialize)]
pub struct DocumentScreening {
    pub path: String,
    pub file_name: String,
    pub matches: Vec<KeywordCount>,
    pub score: usize,
    pub passed: bool,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub threshold: usize,
    /// Per-document results in working-set order.
    pub documents: Vec<DocumentScreening>,
    pub passing: usize,
}

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub path: String,
    pub text: String,
    pub preview: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub count: usize,
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    /// False when the candidate was already selected (rejected no-op).
    pub added: bool,
    pub selected: usize,
}

#[derive(Debug, Serialize)]
pub struct DeselectResponse {
    pub removed: bool,
    pub selected: usize,
}

#[derive(Debug, Deserialize)]
pub struct AutoSelectRequest {
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

#[derive(Debug, Serialize)]
pub struct AutoSelectResponse {
    pub selected: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub destination: String,
    pub format: ReportFormat,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub exported: usize,
    pub destination: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Document working set
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
///
/// Replaces the working set with the given paths, preserving caller order.
/// Match results of the previous set are discarded; the selection is not.
pub async fn handle_load_documents(
    State(state): State<AppState>,
    Json(request): Json<LoadDocumentsRequest>,
) -> Result<Json<LoadDocumentsResponse>, AppError> {
    if request.paths.is_empty() {
        return Err(AppError::Validation("paths cannot be empty".to_string()));
    }

    let loaded = request.paths.len();
    state.workspace.write().await.load_documents(request.paths);
    info!("Loaded {loaded} documents into the working set");
    Ok(Json(LoadDocumentsResponse { loaded }))
}

/// GET /api/v1/documents
pub async fn handle_list_documents(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    let workspace = state.workspace.read().await;
    Json(
        workspace
            .documents()
            .iter()
            .map(|path| DocumentSummary {
                path: path.clone(),
                file_name: file_name_of(path),
                score: workspace.score_for(path),
            })
            .collect(),
    )
}

/// POST /api/v1/documents/shuffle
///
/// Shuffles the working-set order in place and returns the new order.
pub async fn handle_shuffle(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    {
        state.workspace.write().await.shuffle();
    }
    info!("Shuffled working set");
    handle_list_documents(State(state)).await
}

/// GET /api/v1/documents/preview?path=
///
/// Extracted text of one loaded document plus the 200-character preview used
/// in the export report.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PreviewResponse>, AppError> {
    if !state.workspace.read().await.contains(&query.path) {
        return Err(AppError::NotFound(format!(
            "Document {} is not loaded",
            query.path
        )));
    }

    let text = state.extractor.extract(Path::new(&query.path)).await;
    let preview = preview_of(&text);
    Ok(Json(PreviewResponse {
        path: query.path,
        text,
        preview,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Screening
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screen
///
/// Runs the keyword filter over the working set: extracts each document's
/// text (a document that fails to read degrades to placeholder text and the
/// batch continues), computes whole-word match counts, and records the
/// results as the current match state. Results come back in working-set
/// order; `passed` uses `score >= threshold`.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, AppError> {
    let keywords = resolve_keywords(&state, &request).await?;
    if keywords.is_empty() {
        return Err(AppError::Validation(
            "no keywords to screen with".to_string(),
        ));
    }

    let documents: Vec<String> = state.workspace.read().await.documents().to_vec();
    if documents.is_empty() {
        return Err(AppError::Validation("no documents loaded".to_string()));
    }

    let mut results = HashMap::new();
    let mut screenings = Vec::with_capacity(documents.len());
    for path in &documents {
        let text = state.extractor.extract(Path::new(path)).await;
        let matches = compute_matches(&text, &keywords, request.case_sensitive);
        let score = aggregate_score(&matches);
        screenings.push(DocumentScreening {
            path: path.clone(),
            file_name: file_name_of(path),
            matches: matches.clone(),
            score,
            passed: score >= request.threshold,
        });
        results.insert(path.clone(), matches);
    }

    let passing = screenings.iter().filter(|s| s.passed).count();
    info!(
        "Screened {} documents against {} keywords; {passing} meet threshold {}",
        documents.len(),
        keywords.len(),
        request.threshold
    );

    state
        .workspace
        .write()
        .await
        .record_matches(results, request.case_sensitive);

    Ok(Json(ScreenResponse {
        threshold: request.threshold,
        documents: screenings,
        passing,
    }))
}

/// Keywords for a screen run: the explicit list when given (trimmed, empties
/// dropped, order preserved), otherwise the stored category's list.
async fn resolve_keywords(
    state: &AppState,
    request: &ScreenRequest,
) -> Result<Vec<String>, AppError> {
    match (&request.keywords, request.category_id) {
        (Some(list), _) if !list.is_empty() => Ok(list
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()),
        (_, Some(category_id)) => {
            if !store::category_exists(&state.db, category_id).await? {
                return Err(AppError::NotFound(format!(
                    "Category {category_id} not found"
                )));
            }
            store::list_keywords(&state.db, category_id).await
        }
        _ => Err(AppError::Validation(
            "provide keywords or category_id".to_string(),
        )),
    }
}

/// GET /api/v1/documents/analysis?path=
///
/// Per-keyword counts and first-occurrence context snippets for one document
/// from the latest screen run, sorted by count descending.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<Vec<KeywordAnalysis>>, AppError> {
    let (matches, case_sensitive) = {
        let workspace = state.workspace.read().await;
        let matches = workspace
            .matches_for(&query.path)
            .ok_or_else(|| {
                AppError::NotFound(format!("No screening results for {}", query.path))
            })?
            .to_vec();
        (matches, workspace.case_sensitive())
    };

    let text = state.extractor.extract(Path::new(&query.path)).await;
    let mut analysis: Vec<KeywordAnalysis> = matches
        .iter()
        .map(|m| KeywordAnalysis {
            keyword: m.keyword.clone(),
            count: m.count,
            context: find_context(&text, &m.keyword, case_sensitive),
        })
        .collect();
    analysis.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(Json(analysis))
}

// ────────────────────────────────────────────────────────────────────────────
// Selection + export
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/selection
pub async fn handle_get_selection(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    let workspace = state.workspace.read().await;
    Json(
        workspace
            .selection()
            .iter()
            .map(|path| DocumentSummary {
                path: path.clone(),
                file_name: file_name_of(path),
                score: workspace.score_for(path),
            })
            .collect(),
    )
}

/// POST /api/v1/selection
///
/// Appends a loaded document to the selection. Re-selecting an already
/// selected candidate is a rejected no-op reported via `added: false`.
pub async fn handle_select(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<SelectResponse>, AppError> {
    let mut workspace = state.workspace.write().await;
    if !workspace.contains(&request.path) {
        return Err(AppError::NotFound(format!(
            "Document {} is not loaded",
            request.path
        )));
    }
    let added = workspace.select(&request.path);
    Ok(Json(SelectResponse {
        added,
        selected: workspace.selection().len(),
    }))
}

/// DELETE /api/v1/selection
///
/// Removing a candidate that is not selected is a silent no-op.
pub async fn handle_deselect(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Json<DeselectResponse> {
    let mut workspace = state.workspace.write().await;
    let removed = workspace.deselect(&request.path);
    Json(DeselectResponse {
        removed,
        selected: workspace.selection().len(),
    })
}

/// POST /api/v1/selection/auto
///
/// Replaces the selection wholesale with exactly the documents whose score
/// passes the threshold, in working-set order.
pub async fn handle_auto_select(
    State(state): State<AppState>,
    Json(request): Json<AutoSelectRequest>,
) -> Json<AutoSelectResponse> {
    let selected = state.workspace.write().await.auto_select(request.threshold);
    info!(
        "Auto-selected {selected} candidates at threshold {}",
        request.threshold
    );
    Json(AutoSelectResponse { selected })
}

/// POST /api/v1/export
///
/// Writes the report for the current selection, one row per candidate in
/// selection order.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    if request.destination.trim().is_empty() {
        return Err(AppError::Validation(
            "destination cannot be empty".to_string(),
        ));
    }

    let (selection, match_map) = {
        let workspace = state.workspace.read().await;
        let selection = workspace.selection().to_vec();
        let match_map: HashMap<String, Vec<KeywordCount>> = selection
            .iter()
            .filter_map(|path| {
                workspace
                    .matches_for(path)
                    .map(|m| (path.clone(), m.to_vec()))
            })
            .collect();
        (selection, match_map)
    };

    if selection.is_empty() {
        return Err(AppError::Validation(
            "no candidates selected".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(selection.len());
    for path in &selection {
        let text = state.extractor.extract(Path::new(path)).await;
        let matches = match_map.get(path).map(|m| m.as_slice()).unwrap_or(&[]);
        rows.push(build_row(path, matches, &text));
    }

    write_report(Path::new(&request.destination), &rows, request.format)?;
    info!("Exported {} candidates to {}", rows.len(), request.destination);

    Ok(Json(ExportResponse {
        exported: rows.len(),
        destination: request.destination,
    }))
}
