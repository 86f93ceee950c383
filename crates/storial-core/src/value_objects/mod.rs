//! Value objects - immutable types that represent domain concepts

mod entity_id;
mod gender;
mod reading_time;
mod slug;

pub use entity_id::{EntityId, EntityIdParseError, IdGenerator};
pub use gender::Gender;
pub use reading_time::{count_chars, ReadingTime, CHARS_PER_MINUTE};
pub use slug::Slug;
