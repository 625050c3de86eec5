use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};
use tracing::instrument;

use scribe_blog::{Post, PostDraft};
use scribe_core::{PostId, UserId};

use super::{Page, StoreError, map_sqlx_error};

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    timestamp: DateTime<Utc>,
    author_id: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::new(row.id),
            title: row.title,
            content: row.content,
            timestamp: row.timestamp,
            author_id: UserId::new(row.author_id),
        }
    }
}

/// Creation time for the next post: `now`, but never earlier than the newest
/// existing post, so timestamps do not go backwards when the wall clock does.
async fn next_timestamp(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, StoreError> {
    let latest: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT timestamp FROM posts ORDER BY id DESC LIMIT 1")
            .fetch_optional(conn)
            .await
            .map_err(|e| map_sqlx_error("latest_post_timestamp", e))?;

    Ok(latest.map_or(now, |latest| latest.max(now)))
}

#[instrument(skip(conn, draft), fields(author_id = %author_id), err)]
pub async fn insert(
    conn: &mut SqliteConnection,
    author_id: UserId,
    draft: &PostDraft,
    now: DateTime<Utc>,
) -> Result<Post, StoreError> {
    let timestamp = next_timestamp(conn, now).await?;

    let row = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (title, content, timestamp, author_id)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, title, content, timestamp, author_id
        "#,
    )
    .bind(draft.title())
    .bind(draft.content())
    .bind(timestamp)
    .bind(author_id.get())
    .fetch_one(conn)
    .await
    .map_err(|e| map_sqlx_error("insert_post", e))?;

    Ok(row.into())
}

#[instrument(skip(conn), err)]
pub async fn get(conn: &mut SqliteConnection, id: PostId) -> Result<Option<Post>, StoreError> {
    let row = sqlx::query_as::<_, PostRow>(
        "SELECT id, title, content, timestamp, author_id FROM posts WHERE id = ?1",
    )
    .bind(id.get())
    .fetch_optional(conn)
    .await
    .map_err(|e| map_sqlx_error("get_post", e))?;

    Ok(row.map(Post::from))
}

#[instrument(skip(conn), err)]
pub async fn list(conn: &mut SqliteConnection, page: Page) -> Result<Vec<Post>, StoreError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, timestamp, author_id
        FROM posts
        ORDER BY id ASC
        LIMIT ?1 OFFSET ?2
        "#,
    )
    .bind(page.limit)
    .bind(page.skip)
    .fetch_all(conn)
    .await
    .map_err(|e| map_sqlx_error("list_posts", e))?;

    Ok(rows.into_iter().map(Post::from).collect())
}

/// Persist a post's title and content. Authorship and timestamp are never written.
#[instrument(skip(conn, post), fields(post_id = %post.id), err)]
pub async fn update(conn: &mut SqliteConnection, post: &Post) -> Result<Post, StoreError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET title = ?1, content = ?2
        WHERE id = ?3
        RETURNING id, title, content, timestamp, author_id
        "#,
    )
    .bind(&post.title)
    .bind(&post.content)
    .bind(post.id.get())
    .fetch_optional(conn)
    .await
    .map_err(|e| map_sqlx_error("update_post", e))?;

    row.map(Post::from).ok_or(StoreError::NotFound("post"))
}

/// Delete a post; its comments go with it (`ON DELETE CASCADE`).
#[instrument(skip(conn), err)]
pub async fn delete(conn: &mut SqliteConnection, id: PostId) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
        .bind(id.get())
        .execute(conn)
        .await
        .map_err(|e| map_sqlx_error("delete_post", e))?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("post"));
    }
    Ok(())
}

/// Posts whose title or content contains `query`.
///
/// `instr()` matches the bytes literally and case-sensitively, so `%`, `_`
/// and other LIKE metacharacters in `query` carry no special meaning.
#[instrument(skip(conn), err)]
pub async fn search(conn: &mut SqliteConnection, query: &str) -> Result<Vec<Post>, StoreError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, timestamp, author_id
        FROM posts
        WHERE instr(title, ?1) > 0 OR instr(content, ?1) > 0
        ORDER BY id ASC
        "#,
    )
    .bind(query)
    .fetch_all(conn)
    .await
    .map_err(|e| map_sqlx_error("search_posts", e))?;

    Ok(rows.into_iter().map(Post::from).collect())
}
