//! Chapter entity <-> model mapper

use storial_core::{Author, Chapter, ChapterWithStory, EntityId, StoryRef};

use crate::models::{ChapterModel, ChapterRowModel};

/// Word counts are stored as `BIGINT`; values past `i64::MAX` saturate
pub fn word_counts_to_db(word_counts: u64) -> i64 {
    i64::try_from(word_counts).unwrap_or(i64::MAX)
}

/// Convert ChapterModel to Chapter entity
impl From<ChapterModel> for Chapter {
    fn from(model: ChapterModel) -> Self {
        Chapter {
            id: EntityId::new(model.id),
            story_id: EntityId::new(model.story_id),
            title: model.title,
            slug: model.slug,
            body: model.body,
            author_comment: model.author_comment,
            word_counts: u64::try_from(model.word_counts).unwrap_or_default(),
            reading_time: model.reading_time,
            is_published: model.is_published,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a joined chapter row into the chapter with story and owner
impl From<ChapterRowModel> for ChapterWithStory {
    fn from(row: ChapterRowModel) -> Self {
        let story = StoryRef {
            id: EntityId::new(row.chapter.story_id),
            user_id: EntityId::new(row.story_user_id),
            title: row.story_title,
            slug: row.story_slug,
        };
        let author = Author {
            id: EntityId::new(row.story_user_id),
            name: row.author_name,
            username: row.author_username,
            email: row.author_email,
        };

        ChapterWithStory {
            chapter: Chapter::from(row.chapter),
            story,
            author,
        }
    }
}
