//! Story entity <-> model mapper

use storial_core::{Author, Category, EntityId, Story, StoryWithRelations};

use crate::models::{StoryModel, StoryRowModel};

/// Convert StoryModel to Story entity
impl From<StoryModel> for Story {
    fn from(model: StoryModel) -> Self {
        Story {
            id: EntityId::new(model.id),
            user_id: EntityId::new(model.user_id),
            category_id: EntityId::new(model.category_id),
            title: model.title,
            slug: model.slug,
            description: model.description,
            cover: model.cover,
            is_adult: model.is_adult,
            is_published: model.is_published,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a joined story row into the story with its owner and category
impl From<StoryRowModel> for StoryWithRelations {
    fn from(row: StoryRowModel) -> Self {
        let author = Author {
            id: EntityId::new(row.story.user_id),
            name: row.author_name,
            username: row.author_username,
            email: row.author_email,
        };
        let category = Category::new(
            EntityId::new(row.story.category_id),
            row.category_name,
            row.category_slug,
        );

        StoryWithRelations {
            story: Story::from(row.story),
            author,
            category,
        }
    }
}
