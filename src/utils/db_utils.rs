use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::utils::{
    error::AppError,
    logger::{log_error, log_info},
};

const CREATE_PROJECTS: &str = "CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL
    )";

const CREATE_COMPONENTS: &str = "CREATE TABLE IF NOT EXISTS components (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL,
        label TEXT NOT NULL,
        metadata TEXT,
        FOREIGN KEY (project_id) REFERENCES projects(id)
    )";

/// Opens (creating if missing) the SQLite file at `db_path` and makes sure
/// both tables exist.
pub async fn get_db_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::FileError(format!(
                    "Failed to create database directory {}: {}",
                    parent.to_string_lossy(),
                    e
                ))
            })?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|err| {
            log_error(&format!(
                "FAILED :: OPEN database {}: {}",
                db_path.to_string_lossy(),
                err
            ));
            AppError::DatabaseError(format!(
                "Failed to open database {}. Reason: {}",
                db_path.to_string_lossy(),
                err
            ))
        })?;

    init_db(&pool).await?;
    log_info(&format!("Database ready at {}", db_path.to_string_lossy()));
    Ok(pool)
}

/// Single-connection in-memory pool with the schema applied.
pub async fn get_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|err| AppError::DatabaseError(err.to_string()))?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|err| AppError::DatabaseError(err.to_string()))?;

    init_db(&pool).await?;
    Ok(pool)
}

/// Creates the `projects` and `components` tables when absent.
pub async fn init_db(pool: &SqlitePool) -> Result<()> {
    for statement in [CREATE_PROJECTS, CREATE_COMPONENTS] {
        sqlx::query(statement).execute(pool).await.map_err(|err| {
            log_error(&format!("FAILED :: schema init: {}", err));
            AppError::DatabaseError(format!("Failed to initialize schema. Reason: {}", err))
        })?;
    }
    Ok(())
}
