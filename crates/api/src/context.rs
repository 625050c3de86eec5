use scribe_blog::User;
use scribe_core::UserId;

/// The authenticated caller of a request.
///
/// Built by the `CurrentUser` extractor from a verified bearer token and the
/// matching user row; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    id: UserId,
    username: String,
}

impl CurrentUser {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self::new(user.id, user.username)
    }
}
