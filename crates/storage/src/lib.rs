use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use tracing::warn;

/// SQLite-backed persistence for named state slices.
///
/// Each slice is stored as a single JSON payload under its slice key, the
/// same shape the browser build kept in local storage. The store rehydrates
/// slices at startup and saves them whenever they change.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        let storage = Self { pool };
        storage.ensure_state_slices_table().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_state_slices_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS state_slices (
                slice      TEXT PRIMARY KEY,
                payload    TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure state_slices table exists")?;

        Ok(())
    }

    pub async fn save_slice<T: Serialize>(&self, slice: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize slice '{slice}'"))?;

        sqlx::query(
            "INSERT INTO state_slices (slice, payload, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(slice) DO UPDATE SET
                 payload = excluded.payload,
                 updated_at = excluded.updated_at",
        )
        .bind(slice)
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to save slice '{slice}'"))?;

        Ok(())
    }

    /// Loads a persisted slice. An unreadable payload is treated the same as
    /// a missing one, so a schema change never blocks startup.
    pub async fn load_slice<T: DeserializeOwned>(&self, slice: &str) -> Result<Option<T>> {
        let row = sqlx::query("SELECT payload FROM state_slices WHERE slice = ?")
            .bind(slice)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load slice '{slice}'"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row.get(0);
        match serde_json::from_str(&payload) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(slice, %err, "discarding unreadable persisted slice");
                Ok(None)
            }
        }
    }

    pub async fn delete_slice(&self, slice: &str) -> Result<()> {
        sqlx::query("DELETE FROM state_slices WHERE slice = ?")
            .bind(slice)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete slice '{slice}'"))?;
        Ok(())
    }

    pub async fn list_slices(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT slice FROM state_slices ORDER BY slice")
            .fetch_all(&self.pool)
            .await
            .context("failed to list slices")?;
        Ok(rows.into_iter().map(|row| row.get(0)).collect())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(PathBuf::from(path))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
