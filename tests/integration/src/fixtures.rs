//! Test fixtures and data generators
//!
//! Provides unique form data and the response shapes the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a suffix unique across test processes sharing one database
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!(
        "{}{}{n}",
        chrono::Utc::now().timestamp_millis(),
        std::process::id()
    )
}

/// Registration form
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub sex: String,
}

impl RegisterForm {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Writer {suffix}"),
            username: format!("writer{suffix}"),
            email: format!("writer{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            sex: "1".to_string(),
        }
    }

    pub fn fields(&self) -> Vec<(&str, &str)> {
        vec![
            ("name", self.name.as_str()),
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("sex", self.sex.as_str()),
        ]
    }

    pub fn login_fields(&self) -> Vec<(&str, &str)> {
        vec![
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ]
    }
}

/// Story form with a unique title
#[derive(Debug, Clone)]
pub struct StoryForm {
    pub category_id: String,
    pub title: String,
    pub description: String,
    pub is_adult: String,
    pub is_published: String,
}

impl StoryForm {
    /// A published story in the seeded "fantasy" category
    pub fn unique() -> Self {
        Self {
            category_id: FANTASY_CATEGORY_ID.to_string(),
            title: format!("The Long Road {}", unique_suffix()),
            description: "A story about a very long road".to_string(),
            is_adult: "0".to_string(),
            is_published: "1".to_string(),
        }
    }

    pub fn fields(&self) -> Vec<(&str, &str)> {
        vec![
            ("categoryId", self.category_id.as_str()),
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("isAdult", self.is_adult.as_str()),
            ("isPublished", self.is_published.as_str()),
        ]
    }
}

/// Id of the seeded "fantasy" category
pub const FANTASY_CATEGORY_ID: i64 = 1;

/// Slug of the seeded "fantasy" category
pub const FANTASY_CATEGORY_SLUG: &str = "fantasy";

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub token: String,
    pub sex: String,
}

/// Status response
#[derive(Debug, Deserialize)]
pub struct Status {
    pub status: bool,
}

/// Category with story count
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub story_counts: i64,
}

/// Story as returned by create and edit
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDetail {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub category: Category,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub is_adult: bool,
    pub is_published: bool,
    pub cover: String,
}

/// Story page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryBySlug {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub chapter_counts: i64,
    pub reading_time: String,
}

/// Story list item; the listing routes share these fields
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryListItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub slug: String,
}

/// Chapter as returned by create and edit
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDetail {
    pub id: i64,
    pub story_id: i64,
    pub title: String,
    pub slug: String,
    pub author_comment: String,
    pub word_counts: u64,
    pub likes: i64,
    pub reading_time: String,
    pub is_published: bool,
}

/// Chapter read view
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRead {
    pub id: i64,
    pub story_id: i64,
    pub slug: String,
    pub body: String,
    pub likes: i64,
    pub reading_time: String,
}

/// Chapter list item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub id: i64,
    pub story_id: i64,
    pub slug: String,
    pub word_counts: u64,
    pub likes: i64,
}
