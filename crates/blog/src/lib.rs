//! Blog domain: users, posts, and comments.
//!
//! Entities here are plain data with validated constructors for their inputs.
//! Persistence and HTTP live in `scribe-infra` and `scribe-api`.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentDraft};
pub use post::{Post, PostDraft, MAX_TITLE_LEN};
pub use user::{NewUser, User, MAX_USERNAME_LEN};
