use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use scribe_blog::{Post, PostDraft};
use scribe_core::PostId;
use scribe_infra::db;
use scribe_infra::store::{posts, Page, StoreError};

use crate::app::dto::{PageQuery, PostRequest};
use crate::app::errors::ApiError;
use crate::app::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app::routes::comments;
use crate::app::state::AppState;
use crate::authz::ensure_author;
use crate::context::CurrentUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:post_id", get(get_post).put(update_post).delete(delete_post))
        .route(
            "/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}

pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(body): ApiJson<PostRequest>,
) -> Result<Json<Post>, ApiError> {
    let draft = PostDraft::new(body.title, body.content)?;

    let mut tx = state.db.begin().await?;
    let post = posts::insert(&mut tx, user.id(), &draft, Utc::now()).await?;
    db::commit(tx).await?;

    info!(post_id = %post.id, author = %user.username(), "post created");
    Ok(Json(post))
}

pub async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    if q.skip < 0 || q.limit < 0 {
        return Err(ApiError::Validation(
            "skip and limit must not be negative".to_string(),
        ));
    }

    let mut conn = state.db.acquire().await?;
    let page = posts::list(&mut conn, Page::new(q.skip, q.limit)).await?;
    Ok(Json(page))
}

pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<PostId>,
) -> Result<Json<Post>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let post = posts::get(&mut conn, post_id)
        .await?
        .ok_or_else(ApiError::post_not_found)?;
    Ok(Json(post))
}

/// `PUT /posts/{id}`: author only.
pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(post_id): ApiPath<PostId>,
    ApiJson(body): ApiJson<PostRequest>,
) -> Result<Json<Post>, ApiError> {
    let draft = PostDraft::new(body.title, body.content)?;

    let mut tx = state.db.begin().await?;
    let mut post = posts::get(&mut tx, post_id)
        .await?
        .ok_or_else(ApiError::post_not_found)?;
    ensure_author(&post, &user, "update", "post")?;

    post.revise(draft);
    let post = posts::update(&mut tx, &post).await.map_err(post_store_error)?;
    db::commit(tx).await?;

    info!(post_id = %post.id, "post updated");
    Ok(Json(post))
}

/// `DELETE /posts/{id}`: author only. Responds with the deleted post.
pub async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(post_id): ApiPath<PostId>,
) -> Result<Json<Post>, ApiError> {
    let mut tx = state.db.begin().await?;
    let post = posts::get(&mut tx, post_id)
        .await?
        .ok_or_else(ApiError::post_not_found)?;
    ensure_author(&post, &user, "delete", "post")?;

    posts::delete(&mut tx, post.id).await.map_err(post_store_error)?;
    db::commit(tx).await?;

    info!(post_id = %post.id, "post deleted");
    Ok(Json(post))
}

/// `NotFound` from a post write means the row vanished mid-request.
pub(crate) fn post_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(_) => ApiError::post_not_found(),
        other => other.into(),
    }
}
