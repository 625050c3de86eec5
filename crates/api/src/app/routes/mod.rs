use axum::{routing::get, routing::post, Router};

use crate::app::state::AppState;

pub mod accounts;
pub mod comments;
pub mod posts;
pub mod search;
pub mod system;

/// Router for every API endpoint.
///
/// Authentication is per handler: mutating handlers take a `CurrentUser`,
/// read-only ones do not.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/search", get(search::search_posts))
        .nest("/posts", posts::router())
}
