use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scribe_core::{Authored, DomainError, DomainResult, Entity, PostId, UserId};

/// Longest accepted post title, in characters.
pub const MAX_TITLE_LEN: usize = 150;

/// A published blog post.
///
/// # Invariants
/// - `author_id` is fixed at creation; only that author may edit or delete.
/// - `timestamp` is assigned by the server when the post is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author_id: UserId,
}

impl Post {
    /// Replace title and content with a new draft. Authorship and timestamp stay.
    pub fn revise(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.content = draft.content;
    }
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Authored for Post {
    fn author_id(&self) -> UserId {
        self.author_id
    }
}

/// Title and content submitted for a new or updated post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> DomainResult<Self> {
        let title = title.into();
        if title.is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::validation(format!(
                "title must be at most {MAX_TITLE_LEN} characters"
            )));
        }

        Ok(Self {
            title,
            content: content.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
