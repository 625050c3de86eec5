use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use scribe_auth::{PasswordError, TokenError};
use scribe_core::DomainError;
use scribe_infra::StoreError;

/// Every failure a handler can surface, with its HTTP mapping.
///
/// Bodies are always `{"error": <code>, "detail": <message>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid request input.
    #[error("{0}")]
    Validation(String),

    /// Missing/invalid bearer token, or bad login credentials.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Authenticated, but not the owner of the resource.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation. Rendered as 400.
    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn credentials() -> Self {
        Self::Unauthorized("Could not validate credentials")
    }

    pub fn bad_login() -> Self {
        Self::Unauthorized("Incorrect username or password")
    }

    pub fn username_taken() -> Self {
        Self::Conflict("Username already registered".to_string())
    }

    pub fn post_not_found() -> Self {
        Self::NotFound("Post not found".to_string())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let detail = match &self {
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let mut response = json_error(status, code, detail);
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

pub fn json_error(status: StatusCode, code: &'static str, detail: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "detail": detail.into(),
        })),
    )
        .into_response()
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::NotFound(what) => ApiError::NotFound(format!("{what} not found")),
            err @ StoreError::Database { .. } => ApiError::internal(err),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::internal(err)
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken(_) => ApiError::credentials(),
            err @ (TokenError::Signing(_) | TokenError::TtlOutOfRange(_)) => ApiError::internal(err),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::internal(err)
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::Validation(rejection.body_text())
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, FormRejection, QueryRejection, PathRejection);
