//! Database models - SQLx-compatible structs for PostgreSQL tables

mod category;
mod chapter;
mod story;
mod user;

pub use category::CategoryModel;
pub use chapter::{ChapterModel, ChapterRowModel};
pub use story::{StoryModel, StoryRowModel};
pub use user::UserModel;
