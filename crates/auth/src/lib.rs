//! `scribe-auth`: credentials, bearer tokens, and ownership checks.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod authorize;
pub mod claims;
pub mod password;
pub mod token;

pub use authorize::{assert_owner, AuthzError};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Hs256Jwt, JwtValidator, TokenError, DEFAULT_TOKEN_TTL_MINUTES};
