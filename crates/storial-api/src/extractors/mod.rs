//! Axum extractors for request handling
//!
//! Custom extractors for authentication, form bodies and path ids.

mod auth;
mod form;
mod path;

pub use auth::AuthUser;
pub use form::{FormData, COVER_FIELD};
pub use path::{ChapterIdPath, DeleteStoryPath, StoryChapterIdPath, StoryIdPath};
