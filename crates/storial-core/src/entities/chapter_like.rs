//! Chapter like - one reader's vote on a chapter

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLike {
    pub chapter_id: EntityId,
    pub user_id: EntityId,
    pub created_at: DateTime<Utc>,
}

impl ChapterLike {
    pub fn new(chapter_id: EntityId, user_id: EntityId) -> Self {
        Self {
            chapter_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
