use axum::{extract::State, Json};
use chrono::Utc;
use tracing::info;

use scribe_blog::{Comment, CommentDraft};
use scribe_core::PostId;
use scribe_infra::db;
use scribe_infra::store::{comments, posts};

use crate::app::dto::CommentRequest;
use crate::app::errors::ApiError;
use crate::app::extract::{ApiJson, ApiPath};
use crate::app::routes::posts::post_store_error;
use crate::app::state::AppState;
use crate::context::CurrentUser;

/// `POST /posts/{id}/comments`: any authenticated user, existing post only.
pub async fn create_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(post_id): ApiPath<PostId>,
    ApiJson(body): ApiJson<CommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let draft = CommentDraft::new(body.content)?;

    let mut tx = state.db.begin().await?;
    if posts::get(&mut tx, post_id).await?.is_none() {
        return Err(ApiError::post_not_found());
    }
    let comment = comments::insert(&mut tx, post_id, user.id(), &draft, Utc::now())
        .await
        .map_err(post_store_error)?;
    db::commit(tx).await?;

    info!(comment_id = %comment.id, post_id = %post_id, author = %user.username(), "comment added");
    Ok(Json(comment))
}

/// `GET /posts/{id}/comments`: an unknown post simply has no comments.
pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<PostId>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let listed = comments::list_for_post(&mut conn, post_id).await?;
    Ok(Json(listed))
}
