//! Domain entities - core business objects

mod category;
mod chapter;
mod chapter_like;
mod story;
mod user;

pub use category::Category;
pub use chapter::{Chapter, ChapterWithStory, StoryRef};
pub use chapter_like::ChapterLike;
pub use story::{Story, StoryWithRelations, COVER_URL_PREFIX};
pub use user::{Author, User, UserProfile};
