//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AuthRepository, CategoryRepository, ChapterRepository, ChapterUpdateKey,
    RepoResult, StoryFilter, StoryRepository,
};
