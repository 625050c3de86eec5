use axum::{extract::State, Json};
use tracing::{info, warn};

use scribe_auth::{hash_password, verify_password};
use scribe_blog::NewUser;
use scribe_infra::db;
use scribe_infra::store::users;
use scribe_infra::StoreError;

use crate::app::dto::{LoginForm, RegisterRequest, TokenResponse, UserResponse};
use crate::app::errors::ApiError;
use crate::app::extract::{ApiForm, ApiJson};
use crate::app::state::AppState;

/// `POST /register`
///
/// Checks for an existing username first, then inserts. Two concurrent
/// registrations can both pass the check; the UNIQUE constraint catches the
/// loser and its transaction is rolled back.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let new_user = NewUser::new(body.username, body.password)?;

    let mut conn = state.db.acquire().await?;
    let existing = users::find_by_username(&mut conn, new_user.username()).await?;
    drop(conn);

    if existing.is_some() {
        info!(username = %new_user.username(), "registration refused: username taken");
        return Err(ApiError::username_taken());
    }

    let password = new_user.password().to_owned();
    let digest = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let mut tx = state.db.begin().await?;
    let user = match users::insert(&mut tx, new_user.username(), &digest).await {
        Ok(user) => user,
        Err(StoreError::Conflict(e)) => {
            warn!(username = %new_user.username(), error = %e, "registration lost a race on username");
            return Err(ApiError::username_taken());
        }
        Err(e) => return Err(e.into()),
    };
    db::commit(tx).await.map_err(|e| match e {
        StoreError::Conflict(_) => ApiError::username_taken(),
        other => other.into(),
    })?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(user.into()))
}

/// `POST /login`: form-encoded `username` / `password`.
pub async fn login(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let user = users::find_by_username(&mut conn, &form.username).await?;
    drop(conn);

    let Some(user) = user else {
        info!(username = %form.username, "login failed: unknown user");
        return Err(ApiError::bad_login());
    };

    let digest = user.password_hash.clone();
    let password = form.password;
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &digest)).await?;
    if !valid {
        info!(username = %user.username, "login failed: wrong password");
        return Err(ApiError::bad_login());
    }

    let token = state.jwt.issue(&user.username)?;
    info!(user_id = %user.id, "login succeeded");
    Ok(Json(TokenResponse::bearer(token)))
}
