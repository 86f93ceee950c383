//! Chapter entity - a single writing unit inside a story

use chrono::{DateTime, Utc};

use crate::entities::Author;
use crate::value_objects::{count_chars, EntityId, ReadingTime, Slug};

/// Chapter entity
///
/// `word_counts` and `reading_time` are always derived from `body`;
/// use [`Chapter::new`] or [`Chapter::revise`] rather than setting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: EntityId,
    pub story_id: EntityId,
    pub title: String,
    /// Derived from the title only, no id suffix
    pub slug: String,
    pub body: String,
    pub author_comment: String,
    pub word_counts: u64,
    pub reading_time: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(
        id: EntityId,
        story_id: EntityId,
        title: String,
        body: String,
        author_comment: String,
        is_published: bool,
    ) -> Self {
        let now = Utc::now();
        let word_counts = count_chars(&body);
        Self {
            id,
            story_id,
            slug: Slug::from_title(&title).into_inner(),
            title,
            body,
            author_comment,
            word_counts,
            reading_time: ReadingTime::from_word_counts(word_counts).to_string(),
            is_published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and body, recomputing every derived field
    pub fn revise(
        &mut self,
        title: String,
        body: String,
        author_comment: String,
        is_published: bool,
    ) {
        self.word_counts = count_chars(&body);
        self.reading_time = ReadingTime::from_word_counts(self.word_counts).to_string();
        self.slug = Slug::from_title(&title).into_inner();
        self.title = title;
        self.body = body;
        self.author_comment = author_comment;
        self.is_published = is_published;
        self.updated_at = Utc::now();
    }

    /// Total reading time of a set of chapters, e.g. "3 Minutes"
    pub fn total_reading_time(chapters: &[Chapter]) -> String {
        ReadingTime::from_totals(chapters.iter().map(|c| c.word_counts)).to_string()
    }
}

/// Minimal story fields carried alongside a chapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRef {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
    pub slug: String,
}

/// A chapter joined with its story and the story's owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterWithStory {
    pub chapter: Chapter,
    pub story: StoryRef,
    pub author: Author,
}
