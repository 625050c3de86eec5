//! API-side ownership guard for mutations.
//!
//! This enforces authorship at the handler boundary (before any write), while
//! keeping the domain and storage crates auth-agnostic.

use scribe_auth::assert_owner;
use scribe_core::Authored;

use crate::app::errors::ApiError;
use crate::context::CurrentUser;

/// Fail with 403 unless `user` authored `entity`.
///
/// `action` and `noun` build the detail, e.g. "Not authorized to delete this post".
pub fn ensure_author<E: Authored>(
    entity: &E,
    user: &CurrentUser,
    action: &str,
    noun: &str,
) -> Result<(), ApiError> {
    assert_owner(entity, user.id()).map_err(|e| {
        tracing::warn!(user = %user.username(), error = %e, "{action} refused");
        ApiError::Forbidden(format!("Not authorized to {action} this {noun}"))
    })
}
