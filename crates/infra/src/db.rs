//! SQLite connection pool and schema bootstrap.
//!
//! ## Request scoping
//!
//! Reads borrow a pooled connection for the duration of one handler. Writes go
//! through [`Database::begin`]: the returned `Transaction` rolls back when it is
//! dropped without `commit()`, so every early return or `?` releases it.
//!
//! Write transactions start with `BEGIN IMMEDIATE`. A deferred transaction that
//! reads before it writes cannot upgrade its lock once another writer has
//! committed, and SQLite fails it with `SQLITE_BUSY` instead of waiting.
//! Taking the write lock up front makes concurrent writers queue on the busy
//! timeout.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::config::DatabaseSettings;
use crate::store::{StoreError, map_sqlx_error};

const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        username        TEXT    NOT NULL UNIQUE,
        hashed_password TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        title     TEXT    NOT NULL,
        content   TEXT    NOT NULL,
        timestamp TEXT    NOT NULL,
        author_id INTEGER NOT NULL REFERENCES users (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        content   TEXT    NOT NULL,
        timestamp TEXT    NOT NULL,
        post_id   INTEGER NOT NULL REFERENCES posts (id) ON DELETE CASCADE,
        author_id INTEGER NOT NULL REFERENCES users (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_posts_author_id ON posts (author_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments (post_id)",
    "CREATE INDEX IF NOT EXISTS idx_comments_author_id ON comments (author_id)",
];

/// Shared handle to the relational store.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database described by `settings`.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.url)
            .with_context(|| format!("invalid DATABASE_URL {:?}", settings.url))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .acquire_timeout(BUSY_TIMEOUT)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open SQLite database at {:?}", settings.url))?;

        info!(url = %settings.url, "database pool ready");
        Ok(Self { pool })
    }

    /// A private in-memory database.
    ///
    /// An in-memory SQLite database lives only as long as its connection, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("invalid in-memory SQLite url")?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("failed to open in-memory SQLite database")?;

        Ok(Self { pool })
    }

    /// Create tables and indexes that do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let mut tx = self.begin().await?;
        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        commit(tx).await
    }

    /// Start a write transaction holding SQLite's write lock.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        self.pool
            .begin_with(BEGIN_WRITE)
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))
    }

    /// Borrow a connection for reads.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("acquire_connection", e))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Commit a write transaction, mapping failures like any other store error.
pub async fn commit(tx: Transaction<'_, Sqlite>) -> Result<(), StoreError> {
    tx.commit()
        .await
        .map_err(|e| map_sqlx_error("commit_transaction", e))
}
