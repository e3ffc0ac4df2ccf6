//! Warehouse database initialization
//!
//! Creates the dimensional schema on first run. All statements are
//! idempotent (CREATE TABLE IF NOT EXISTS), so calling this against an
//! existing warehouse is safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize the warehouse database and create the schema if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new warehouse database: {}", db_path.display());
    } else {
        info!("Opened existing warehouse database: {}", db_path.display());
    }

    configure_and_create_schema(&pool).await?;

    Ok(pool)
}

/// Initialize an in-memory warehouse (test fixtures and integration tests)
pub async fn init_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    configure_and_create_schema(&pool).await?;

    Ok(pool)
}

async fn configure_and_create_schema(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers while the ETL writer loads facts
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    create_dim_genre_table(pool).await?;
    create_dim_title_table(pool).await?;
    create_dim_person_table(pool).await?;
    create_fact_ratings_table(pool).await?;
    create_bridge_crew_table(pool).await?;
    create_fact_oscar_awards_table(pool).await?;

    Ok(())
}

/// Genre vocabulary: `genre_idx` is the 0-based position into the
/// `genre_code` flag strings stored on `dim_title`.
async fn create_dim_genre_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dim_genre (
            genre_idx INTEGER PRIMARY KEY,
            genre_name TEXT NOT NULL UNIQUE,
            CHECK (genre_idx >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_dim_title_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dim_title (
            title_id TEXT PRIMARY KEY,
            title_type TEXT NOT NULL,
            primary_title TEXT NOT NULL,
            release_year INTEGER,
            genre_code TEXT,
            CHECK (release_year IS NULL OR release_year >= 1850)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dim_title_year ON dim_title(release_year)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dim_title_type ON dim_title(title_type)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_dim_person_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dim_person (
            person_id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dim_person_name ON dim_person(full_name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_fact_ratings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fact_ratings (
            title_id TEXT PRIMARY KEY REFERENCES dim_title(title_id) ON DELETE CASCADE,
            avg_rating REAL NOT NULL,
            num_votes INTEGER NOT NULL DEFAULT 0,
            CHECK (avg_rating >= 0.0 AND avg_rating <= 10.0),
            CHECK (num_votes >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_bridge_crew_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bridge_crew (
            title_id TEXT NOT NULL REFERENCES dim_title(title_id) ON DELETE CASCADE,
            person_id TEXT NOT NULL REFERENCES dim_person(person_id) ON DELETE CASCADE,
            category TEXT NOT NULL,
            PRIMARY KEY (title_id, person_id, category)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bridge_crew_person ON bridge_crew(person_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bridge_crew_category ON bridge_crew(category)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_fact_oscar_awards_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fact_oscar_awards (
            title_id TEXT NOT NULL,
            category TEXT NOT NULL,
            is_winner INTEGER NOT NULL DEFAULT 0,
            ceremony_year INTEGER,
            CHECK (is_winner IN (0, 1))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_fact_oscar_category ON fact_oscar_awards(category)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
