//! Chapter database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for chapters table
#[derive(Debug, Clone, FromRow)]
pub struct ChapterModel {
    pub id: i64,
    pub story_id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author_comment: String,
    pub word_counts: i64,
    pub reading_time: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chapter joined with its story and the story's owner
#[derive(Debug, Clone, FromRow)]
pub struct ChapterRowModel {
    #[sqlx(flatten)]
    pub chapter: ChapterModel,
    pub story_user_id: i64,
    pub story_title: String,
    pub story_slug: String,
    pub author_name: String,
    pub author_username: String,
    pub author_email: String,
}
