use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Blog API! Manage your blog posts and comments.",
    }))
}
