use scribe_core::{DomainError, DomainResult, Entity, UserId};

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 150;

/// A registered account.
///
/// Users are immutable after registration. The password hash never leaves the
/// service; API responses are built from `id` and `username` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Registration input, validated but not yet hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    password: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> DomainResult<Self> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(DomainError::validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password must not be empty"));
        }

        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
