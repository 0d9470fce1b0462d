//! CRUD access to the keyword store.
//!
//! Every operation is a single atomic statement: a persistence failure
//! leaves prior state unchanged, and nothing here retries.

use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::keywords::models::CategoryRow;

/// Returns all job categories ordered by name.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<CategoryRow>, AppError> {
    Ok(sqlx::query_as::<_, CategoryRow>(
        "SELECT id, name, description FROM job_categories ORDER BY name",
    )
    .fetch_all(pool)
    .await?)
}

/// Creates a job category and returns its id.
/// Empty names are rejected; a duplicate name is a validation error.
pub async fn create_category(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
) -> Result<i64, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "category name cannot be empty".to_string(),
        ));
    }

    let result =
        sqlx::query("INSERT OR IGNORE INTO job_categories (name, description) VALUES ($1, $2)")
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Validation(format!(
            "category '{name}' already exists"
        )));
    }

    info!("Created job category '{name}'");
    Ok(result.last_insert_rowid())
}

pub async fn category_exists(pool: &SqlitePool, category_id: i64) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_categories WHERE id = $1")
        .bind(category_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Returns the keyword texts of a category, sorted lexicographically.
pub async fn list_keywords(pool: &SqlitePool, category_id: i64) -> Result<Vec<String>, AppError> {
    Ok(sqlx::query_scalar::<_, String>(
        "SELECT keyword FROM keywords WHERE category_id = $1 ORDER BY keyword",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?)
}

/// Adds a keyword to a category.
///
/// Keyword text is globally unique regardless of category: adding a text that
/// already exists anywhere in the store is a no-op, reported through the
/// returned flag. Empty or whitespace-only text is rejected before touching
/// the store.
pub async fn add_keyword(
    pool: &SqlitePool,
    text: &str,
    category_id: i64,
) -> Result<bool, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }

    let result =
        sqlx::query("INSERT OR IGNORE INTO keywords (keyword, category_id) VALUES ($1, $2)")
            .bind(text)
            .bind(category_id)
            .execute(pool)
            .await?;

    let added = result.rows_affected() > 0;
    if added {
        info!("Added keyword '{text}' to category {category_id}");
    }
    Ok(added)
}

/// Deletes a keyword by exact text, returning the number of removed rows
/// (at most one, given uniqueness). Deleting a keyword that does not exist
/// is a silent no-op.
pub async fn delete_keyword(pool: &SqlitePool, text: &str) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM keywords WHERE keyword = $1")
        .bind(text)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected();
    if deleted > 0 {
        info!("Deleted keyword '{text}'");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init_schema};

    async fn test_pool() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    async fn keyword_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM keywords")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_categories_sorted_by_name() {
        let pool = test_pool().await;
        create_category(&pool, "Legal", None).await.unwrap();
        create_category(&pool, "Engineering", Some("Hardware and software"))
            .await
            .unwrap();
        create_category(&pool, "Finance", None).await.unwrap();

        let names: Vec<String> = list_categories(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Engineering", "Finance", "Legal"]);
    }

    #[tokio::test]
    async fn test_create_category_rejects_empty_name() {
        let pool = test_pool().await;
        let err = create_category(&pool, "   ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(list_categories(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_category_rejects_duplicate_name() {
        let pool = test_pool().await;
        create_category(&pool, "Legal", None).await.unwrap();
        let err = create_category(&pool, "Legal", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(list_categories(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_keywords_sorted_lexicographically() {
        let pool = test_pool().await;
        let id = create_category(&pool, "Technology & IT", None).await.unwrap();
        add_keyword(&pool, "SQL", id).await.unwrap();
        add_keyword(&pool, "Docker", id).await.unwrap();
        add_keyword(&pool, "Python", id).await.unwrap();

        let keywords = list_keywords(&pool, id).await.unwrap();
        assert_eq!(keywords, vec!["Docker", "Python", "SQL"]);
    }

    #[tokio::test]
    async fn test_add_keyword_unique_across_categories() {
        let pool = test_pool().await;
        let tech = create_category(&pool, "Technology & IT", None).await.unwrap();
        let marketing = create_category(&pool, "Marketing & Sales", None)
            .await
            .unwrap();

        assert!(add_keyword(&pool, "SQL", tech).await.unwrap());
        // Same text under a different category is a no-op: store size unchanged.
        assert!(!add_keyword(&pool, "SQL", marketing).await.unwrap());
        assert_eq!(keyword_count(&pool).await, 1);
        assert!(list_keywords(&pool, marketing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_keyword_rejects_empty_text() {
        let pool = test_pool().await;
        let id = create_category(&pool, "Legal", None).await.unwrap();
        let err = add_keyword(&pool, "  \t ", id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(keyword_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_add_keyword_trims_whitespace() {
        let pool = test_pool().await;
        let id = create_category(&pool, "Legal", None).await.unwrap();
        assert!(add_keyword(&pool, "  Compliance  ", id).await.unwrap());
        assert_eq!(list_keywords(&pool, id).await.unwrap(), vec!["Compliance"]);
    }

    #[tokio::test]
    async fn test_delete_keyword_by_text() {
        let pool = test_pool().await;
        let id = create_category(&pool, "Legal", None).await.unwrap();
        add_keyword(&pool, "Compliance", id).await.unwrap();

        assert_eq!(delete_keyword(&pool, "Compliance").await.unwrap(), 1);
        assert_eq!(keyword_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_keyword_is_silent_noop() {
        let pool = test_pool().await;
        assert_eq!(delete_keyword(&pool, "Nonexistent").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_is_case_sensitive_exact_match() {
        let pool = test_pool().await;
        let id = create_category(&pool, "Legal", None).await.unwrap();
        add_keyword(&pool, "Compliance", id).await.unwrap();

        assert_eq!(delete_keyword(&pool, "compliance").await.unwrap(), 0);
        assert_eq!(keyword_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_category_exists() {
        let pool = test_pool().await;
        let id = create_category(&pool, "Legal", None).await.unwrap();
        assert!(category_exists(&pool, id).await.unwrap());
        assert!(!category_exists(&pool, id + 100).await.unwrap());
    }
}
