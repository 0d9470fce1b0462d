use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Creates and returns the SQLite connection pool, creating the database
/// file (and its parent directory) on first run.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite store at {database_url}");

    if let Some(path) = database_url.strip_prefix("sqlite://") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Single connection: SQLite has one writer, and every store operation is
    // a short-lived single statement issued from the request loop.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS job_categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS keywords (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        keyword TEXT NOT NULL UNIQUE,
        category_id INTEGER,
        FOREIGN KEY (category_id) REFERENCES job_categories (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS keyword_sets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS keyword_set_mappings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        set_id INTEGER,
        keyword_id INTEGER,
        weight INTEGER DEFAULT 1,
        FOREIGN KEY (set_id) REFERENCES keyword_sets (id),
        FOREIGN KEY (keyword_id) REFERENCES keywords (id)
    )
    "#,
];

/// Creates the store tables when absent. Idempotent across restarts.
///
/// keyword_sets / keyword_set_mappings are schema-only: nothing reads them
/// yet. They are the declared extension point for weighted scoring.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Keyword store schema ready");
    Ok(())
}
