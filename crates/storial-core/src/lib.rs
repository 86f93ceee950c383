//! # storial-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Author, Category, Chapter, ChapterLike, ChapterWithStory, Story, StoryRef,
    StoryWithRelations, User, UserProfile, COVER_URL_PREFIX,
};
pub use error::DomainError;
pub use traits::{
    AuthRepository, CategoryRepository, ChapterRepository, ChapterUpdateKey, RepoResult,
    StoryFilter, StoryRepository,
};
pub use value_objects::{
    count_chars, EntityId, EntityIdParseError, Gender, IdGenerator, ReadingTime, Slug,
};
