//! Story entity - a book made of chapters

use chrono::{DateTime, Utc};

use crate::entities::{Author, Category};
use crate::value_objects::{EntityId, Slug};

/// Public route prefix that serves cover images
pub const COVER_URL_PREFIX: &str = "/api/v1/book_front";

/// Story entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub id: EntityId,
    /// Owner; never changes after creation
    pub user_id: EntityId,
    pub category_id: EntityId,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Stored cover filename, empty when there is none
    pub cover: String,
    pub is_adult: bool,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// Create a new story; the slug is suffixed with the id
    pub fn new(
        id: EntityId,
        user_id: EntityId,
        category_id: EntityId,
        title: String,
        description: String,
        is_adult: bool,
        is_published: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            category_id,
            slug: Slug::with_id_suffix(&title, id).into_inner(),
            title,
            description,
            cover: String::new(),
            is_adult,
            is_published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields, keeping id and owner
    ///
    /// The slug is rebuilt from the new title with the original id suffix.
    pub fn revise(
        &mut self,
        category_id: EntityId,
        title: String,
        description: String,
        is_adult: bool,
        is_published: bool,
    ) {
        self.slug = Slug::with_id_suffix(&title, self.id).into_inner();
        self.category_id = category_id;
        self.title = title;
        self.description = description;
        self.is_adult = is_adult;
        self.is_published = is_published;
        self.updated_at = Utc::now();
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: EntityId) -> bool {
        self.user_id == user_id
    }

    #[inline]
    pub fn has_cover(&self) -> bool {
        !self.cover.is_empty()
    }

    /// URL path of the cover image, or an empty string
    pub fn cover_path(&self) -> String {
        if self.has_cover() {
            format!("{COVER_URL_PREFIX}/{}", self.cover)
        } else {
            String::new()
        }
    }
}

/// A story joined with its owner and category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryWithRelations {
    pub story: Story,
    pub author: Author,
    pub category: Category,
}
