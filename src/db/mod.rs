//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all vocabulary data.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vocabularies (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            word TEXT NOT NULL,
            translation TEXT,
            example TEXT,
            pronunciation TEXT,
            word_type TEXT,
            status TEXT NOT NULL DEFAULT 'new'
                CHECK (status IN ('new', 'pending', 'complete')),
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes for the owner-scoped queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_vocabularies_user_created
            ON vocabularies(user_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_vocabularies_user_status
            ON vocabularies(user_id, status);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
