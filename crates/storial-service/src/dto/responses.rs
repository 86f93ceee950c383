//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` with camelCase field names.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storial_core::EntityId;

// ============================================================================
// Common Response Types
// ============================================================================

/// Outcome of a mutation that returns no entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub status: bool,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: true }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Registered or logged-in user with a fresh access token
#[derive(Debug, Clone, Serialize)]
pub struct AuthUserResponse {
    pub id: EntityId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub token: String,
    /// Human readable sex label
    pub sex: String,
}

/// Story owner as shown on the owner's own listing
#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// Story owner as shown to readers
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: EntityId,
    pub name: String,
    pub username: String,
}

// ============================================================================
// Category Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
    pub story_counts: i64,
}

/// Category without its story count
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummaryResponse {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
}

// ============================================================================
// Story Responses
// ============================================================================

/// Full story returned after create and update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDetailResponse {
    pub id: EntityId,
    pub user_id: EntityId,
    pub category_id: EntityId,
    pub category: CategoryResponse,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub is_adult: bool,
    pub is_published: bool,
    /// Cover URL path, empty when the story has no cover
    pub cover: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry of the caller's own story listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryOwnedResponse {
    pub id: EntityId,
    pub user_id: EntityId,
    pub user: OwnerResponse,
    pub title: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Story page with chapter totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryBySlugResponse {
    pub id: EntityId,
    pub user_id: EntityId,
    pub user: AuthorResponse,
    pub category_id: EntityId,
    pub category: CategorySummaryResponse,
    pub title: String,
    pub slug: String,
    pub chapter_counts: i64,
    pub reading_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry of the global filtered listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFilterResponse {
    pub id: EntityId,
    pub user_id: EntityId,
    pub user: AuthorResponse,
    pub title: String,
    pub slug: String,
    pub chapter_counts: i64,
    pub is_adult: bool,
    pub cover: String,
    pub created_at: DateTime<Utc>,
}

/// Entry of a category listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryByCategoryResponse {
    pub id: EntityId,
    pub user_id: EntityId,
    pub user: AuthorResponse,
    pub title: String,
    pub slug: String,
    pub chapter_counts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Chapter Responses
// ============================================================================

/// Full chapter returned after create and update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDetailResponse {
    pub id: EntityId,
    pub story_id: EntityId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author_comment: String,
    pub word_counts: u64,
    pub likes: i64,
    pub reading_time: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Story fields shown above a chapter
#[derive(Debug, Clone, Serialize)]
pub struct ChapterStoryResponse {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
}

/// Chapter as read by its owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterReadResponse {
    pub id: EntityId,
    pub story_id: EntityId,
    pub story: ChapterStoryResponse,
    pub user: AuthorResponse,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author_comment: String,
    pub likes: i64,
    pub reading_time: String,
    pub updated_at: DateTime<Utc>,
}

/// Entry of a story's chapter listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummaryResponse {
    pub id: EntityId,
    pub story_id: EntityId,
    pub title: String,
    pub slug: String,
    pub word_counts: u64,
    pub likes: i64,
}
