use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};
use tracing::instrument;

use scribe_blog::{Comment, CommentDraft};
use scribe_core::{CommentId, PostId, UserId};

use super::{StoreError, map_sqlx_error};

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    content: String,
    timestamp: DateTime<Utc>,
    author_id: i64,
    post_id: i64,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: CommentId::new(row.id),
            content: row.content,
            timestamp: row.timestamp,
            author_id: UserId::new(row.author_id),
            post_id: PostId::new(row.post_id),
        }
    }
}

/// Attach a comment to `post_id`.
///
/// A post deleted between the caller's existence check and this insert trips
/// the foreign key and comes back as `StoreError::NotFound`.
#[instrument(skip(conn, draft), fields(post_id = %post_id, author_id = %author_id), err)]
pub async fn insert(
    conn: &mut SqliteConnection,
    post_id: PostId,
    author_id: UserId,
    draft: &CommentDraft,
    now: DateTime<Utc>,
) -> Result<Comment, StoreError> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO comments (content, timestamp, author_id, post_id)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, content, timestamp, author_id, post_id
        "#,
    )
    .bind(draft.content())
    .bind(now)
    .bind(author_id.get())
    .bind(post_id.get())
    .fetch_one(conn)
    .await
    .map_err(|e| map_sqlx_error("insert_comment", e))?;

    Ok(row.into())
}

#[instrument(skip(conn), err)]
pub async fn list_for_post(
    conn: &mut SqliteConnection,
    post_id: PostId,
) -> Result<Vec<Comment>, StoreError> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT id, content, timestamp, author_id, post_id
        FROM comments
        WHERE post_id = ?1
        ORDER BY id ASC
        "#,
    )
    .bind(post_id.get())
    .fetch_all(conn)
    .await
    .map_err(|e| map_sqlx_error("list_comments", e))?;

    Ok(rows.into_iter().map(Comment::from).collect())
}
