//! Bearer-token authentication for protected routes.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};

use scribe_auth::JwtValidator;
use scribe_infra::store::users;

use crate::app::errors::ApiError;
use crate::app::state::AppState;
use crate::context::CurrentUser;

/// Resolves the caller from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing or malformed, the token fails
/// verification, or its subject no longer names a user.
#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers).ok_or_else(ApiError::credentials)?;

        let subject = state.jwt.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            ApiError::credentials()
        })?;

        let mut conn = state.db.acquire().await?;
        let user = users::find_by_username(&mut conn, &subject)
            .await?
            .ok_or_else(|| {
                tracing::debug!(subject = %subject, "token subject has no user");
                ApiError::credentials()
            })?;

        Ok(user.into())
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;

    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}
