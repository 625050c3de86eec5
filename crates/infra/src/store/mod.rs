//! Repositories for users, posts, and comments.
//!
//! Every function takes a `&mut SqliteConnection`, so callers decide whether it
//! runs on a plain pooled connection or inside a transaction (`&mut *tx`).
//!
//! ## Error Mapping
//!
//! | SQLx Error | SQLite condition | StoreError |
//! |------------|------------------|------------|
//! | Database | UNIQUE constraint | `Conflict` |
//! | Database | FOREIGN KEY constraint | `NotFound` (referenced row is gone) |
//! | anything else | | `Database` |

use thiserror::Error;

pub mod comments;
pub mod posts;
pub mod users;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Offset pagination for list queries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// Build a page. `limit` is honoured as given; negative values are raised
    /// to zero, since SQLite reads `LIMIT -1` as "no limit".
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: skip.max(0),
            limit: limit.max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(format!(
                "unique constraint violated in {}: {}",
                operation,
                db_err.message()
            ));
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::NotFound("referenced row");
        }
    }
    StoreError::Database {
        operation,
        source: err,
    }
}
