use axum::{extract::State, Json};

use scribe_blog::Post;
use scribe_infra::store::posts;

use crate::app::dto::SearchQuery;
use crate::app::errors::ApiError;
use crate::app::extract::ApiQuery;
use crate::app::state::AppState;

/// `GET /search?query=`: literal, case-sensitive match on title or content.
pub async fn search_posts(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let found = posts::search(&mut conn, &q.query).await?;
    Ok(Json(found))
}
