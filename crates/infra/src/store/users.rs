use sqlx::{FromRow, SqliteConnection};
use tracing::instrument;

use scribe_blog::User;
use scribe_core::UserId;

use super::{StoreError, map_sqlx_error};

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    hashed_password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id),
            username: row.username,
            password_hash: row.hashed_password,
        }
    }
}

#[instrument(skip(conn), err)]
pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, StoreError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, hashed_password FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(conn)
    .await
    .map_err(|e| map_sqlx_error("find_user_by_username", e))?;

    Ok(row.map(User::from))
}

#[instrument(skip(conn), err)]
pub async fn find_by_id(conn: &mut SqliteConnection, id: UserId) -> Result<Option<User>, StoreError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, hashed_password FROM users WHERE id = ?1",
    )
    .bind(id.get())
    .fetch_optional(conn)
    .await
    .map_err(|e| map_sqlx_error("find_user_by_id", e))?;

    Ok(row.map(User::from))
}

/// Insert a user row.
///
/// The UNIQUE constraint on `username` is authoritative: a concurrent insert of
/// the same name surfaces here as `StoreError::Conflict` even when a prior
/// existence check passed.
#[instrument(skip(conn, password_hash), err)]
pub async fn insert(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
) -> Result<User, StoreError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, hashed_password)
        VALUES (?1, ?2)
        RETURNING id, username, hashed_password
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(conn)
    .await
    .map_err(|e| map_sqlx_error("insert_user", e))?;

    Ok(row.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn db() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn insert_then_find() {
        let db = db().await;
        let mut conn = db.acquire().await.unwrap();

        let created = insert(&mut conn, "William", "digest").await.unwrap();
        assert_eq!(created.username, "William");

        let by_name = find_by_username(&mut conn, "William").await.unwrap().unwrap();
        assert_eq!(by_name, created);

        let by_id = find_by_id(&mut conn, created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let db = db().await;
        let mut conn = db.acquire().await.unwrap();

        insert(&mut conn, "William", "digest").await.unwrap();
        assert!(find_by_username(&mut conn, "william").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let db = db().await;
        let mut conn = db.acquire().await.unwrap();

        insert(&mut conn, "William", "digest").await.unwrap();
        let err = insert(&mut conn, "William", "other").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_with_its_transaction() {
        let db = db().await;

        let mut tx = db.begin().await.unwrap();
        insert(&mut tx, "ghost", "digest").await.unwrap();
        drop(tx);

        let mut conn = db.acquire().await.unwrap();
        assert!(find_by_username(&mut conn, "ghost").await.unwrap().is_none());
    }
}
