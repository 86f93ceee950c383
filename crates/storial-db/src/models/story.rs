//! Story database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for stories table
#[derive(Debug, Clone, FromRow)]
pub struct StoryModel {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub is_adult: bool,
    pub is_published: bool,
    pub cover: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Story joined with its owner and category
///
/// Joined columns are aliased with `author_` and `category_` prefixes.
#[derive(Debug, Clone, FromRow)]
pub struct StoryRowModel {
    #[sqlx(flatten)]
    pub story: StoryModel,
    pub author_name: String,
    pub author_username: String,
    pub author_email: String,
    pub category_name: String,
    pub category_slug: String,
}
