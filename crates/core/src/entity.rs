//! Entity traits: identity and authorship.

use crate::id::UserId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity owned by the user who created it.
///
/// Authorship is fixed at creation; ownership checks compare against this id.
pub trait Authored: Entity {
    fn author_id(&self) -> UserId;
}
