//! Ownership policy: only the author may mutate what they created.

use thiserror::Error;

use scribe_core::{Authored, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("user {actor} is not the author (author is {author})")]
    NotOwner { actor: UserId, author: UserId },
}

/// Fail unless `actor` authored `entity`.
///
/// - No IO
/// - No panics
pub fn assert_owner<E: Authored>(entity: &E, actor: UserId) -> Result<(), AuthzError> {
    let author = entity.author_id();
    if author == actor {
        Ok(())
    } else {
        Err(AuthzError::NotOwner { actor, author })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::{Entity, PostId};

    struct Note {
        id: PostId,
        author: UserId,
    }

    impl Entity for Note {
        type Id = PostId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    impl Authored for Note {
        fn author_id(&self) -> UserId {
            self.author
        }
    }

    #[test]
    fn author_passes() {
        let note = Note { id: PostId::new(1), author: UserId::new(7) };
        assert_eq!(assert_owner(&note, UserId::new(7)), Ok(()));
    }

    #[test]
    fn stranger_is_refused() {
        let note = Note { id: PostId::new(1), author: UserId::new(7) };
        assert_eq!(
            assert_owner(&note, UserId::new(8)),
            Err(AuthzError::NotOwner {
                actor: UserId::new(8),
                author: UserId::new(7),
            })
        );
    }
}
