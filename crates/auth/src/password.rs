//! Credential store: salted adaptive password hashing (bcrypt).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hash a password with bcrypt at the library default cost.
///
/// Every call draws a fresh salt, so hashing the same password twice yields
/// different digests that both verify.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Check a password against a stored digest.
///
/// A malformed digest is treated as a mismatch.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match bcrypt::verify(password, digest) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::debug!(error = %e, "password digest could not be verified");
            false
        }
    }
}
