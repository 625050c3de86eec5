use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scribe_core::{Authored, CommentId, DomainError, DomainResult, Entity, PostId, UserId};

/// A comment left on a post by any authenticated user.
///
/// Both `author_id` and `post_id` are fixed at creation. Comments are never
/// edited; they disappear together with their parent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author_id: UserId,
    pub post_id: PostId,
}

impl Entity for Comment {
    type Id = CommentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> UserId {
        self.author_id
    }
}

/// Content submitted for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    content: String,
}

impl CommentDraft {
    pub fn new(content: impl Into<String>) -> DomainResult<Self> {
        let content = content.into();
        if content.is_empty() {
            return Err(DomainError::validation("content must not be empty"));
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_keeps_content() {
        let draft = CommentDraft::new("good post").unwrap();
        assert_eq!(draft.content(), "good post");
    }

    #[test]
    fn empty_comment_rejected() {
        assert!(matches!(
            CommentDraft::new(""),
            Err(DomainError::Validation(_))
        ));
    }
}
