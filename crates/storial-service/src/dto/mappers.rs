//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Responses that need a live count take one of the small `With*` wrappers
//! so the count is computed inside the calling transaction.

use storial_core::{Author, Category, Chapter, ChapterWithStory, StoryWithRelations, User};

use super::responses::{
    AuthUserResponse, AuthorResponse, CategoryResponse, CategorySummaryResponse,
    ChapterDetailResponse, ChapterReadResponse, ChapterStoryResponse, ChapterSummaryResponse,
    OwnerResponse, StoryByCategoryResponse, StoryBySlugResponse, StoryDetailResponse,
    StoryFilterResponse, StoryOwnedResponse,
};

// ============================================================================
// Helper Structs
// ============================================================================

/// A user together with the token just issued for them
pub struct UserWithToken<'a> {
    pub user: &'a User,
    pub token: String,
}

/// A category with the number of stories filed under it
pub struct CategoryWithCount<'a> {
    pub category: &'a Category,
    pub story_counts: i64,
}

/// A story with its chapter count
pub struct StoryWithCount<'a> {
    pub story: &'a StoryWithRelations,
    pub chapter_counts: i64,
}

/// A story with the story count of its category
pub struct StoryWithCategoryCount<'a> {
    pub story: &'a StoryWithRelations,
    pub category_story_counts: i64,
}

/// A story with its chapter totals
pub struct StoryWithChapterTotals<'a> {
    pub story: &'a StoryWithRelations,
    pub chapter_counts: i64,
    pub reading_time: String,
}

/// A chapter with its like count
pub struct ChapterWithLikes<'a, C> {
    pub chapter: &'a C,
    pub likes: i64,
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<UserWithToken<'_>> for AuthUserResponse {
    fn from(value: UserWithToken<'_>) -> Self {
        let user = value.user;
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            token: value.token,
            sex: user.gender_name().to_string(),
        }
    }
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            username: author.username.clone(),
        }
    }
}

impl From<&Author> for OwnerResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            email: author.email.clone(),
        }
    }
}

// ============================================================================
// Category Mappers
// ============================================================================

impl From<CategoryWithCount<'_>> for CategoryResponse {
    fn from(value: CategoryWithCount<'_>) -> Self {
        Self {
            id: value.category.id,
            slug: value.category.slug.clone(),
            name: value.category.name.clone(),
            story_counts: value.story_counts,
        }
    }
}

impl From<&Category> for CategorySummaryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            slug: category.slug.clone(),
            name: category.name.clone(),
        }
    }
}

// ============================================================================
// Story Mappers
// ============================================================================

impl From<StoryWithCategoryCount<'_>> for StoryDetailResponse {
    fn from(value: StoryWithCategoryCount<'_>) -> Self {
        let StoryWithRelations {
            story, category, ..
        } = value.story;
        Self {
            id: story.id,
            user_id: story.user_id,
            category_id: story.category_id,
            category: CategoryWithCount {
                category,
                story_counts: value.category_story_counts,
            }
            .into(),
            title: story.title.clone(),
            slug: story.slug.clone(),
            description: story.description.clone(),
            is_adult: story.is_adult,
            is_published: story.is_published,
            cover: story.cover_path(),
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

impl From<&StoryWithRelations> for StoryOwnedResponse {
    fn from(value: &StoryWithRelations) -> Self {
        let story = &value.story;
        Self {
            id: story.id,
            user_id: story.user_id,
            user: OwnerResponse::from(&value.author),
            title: story.title.clone(),
            slug: story.slug.clone(),
            is_published: story.is_published,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

impl From<StoryWithChapterTotals<'_>> for StoryBySlugResponse {
    fn from(value: StoryWithChapterTotals<'_>) -> Self {
        let story = &value.story.story;
        Self {
            id: story.id,
            user_id: story.user_id,
            user: AuthorResponse::from(&value.story.author),
            category_id: story.category_id,
            category: CategorySummaryResponse::from(&value.story.category),
            title: story.title.clone(),
            slug: story.slug.clone(),
            chapter_counts: value.chapter_counts,
            reading_time: value.reading_time,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

impl From<StoryWithCount<'_>> for StoryFilterResponse {
    fn from(value: StoryWithCount<'_>) -> Self {
        let story = &value.story.story;
        Self {
            id: story.id,
            user_id: story.user_id,
            user: AuthorResponse::from(&value.story.author),
            title: story.title.clone(),
            slug: story.slug.clone(),
            chapter_counts: value.chapter_counts,
            is_adult: story.is_adult,
            cover: story.cover_path(),
            created_at: story.created_at,
        }
    }
}

impl From<StoryWithCount<'_>> for StoryByCategoryResponse {
    fn from(value: StoryWithCount<'_>) -> Self {
        let story = &value.story.story;
        Self {
            id: story.id,
            user_id: story.user_id,
            user: AuthorResponse::from(&value.story.author),
            title: story.title.clone(),
            slug: story.slug.clone(),
            chapter_counts: value.chapter_counts,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

// ============================================================================
// Chapter Mappers
// ============================================================================

impl From<ChapterWithLikes<'_, Chapter>> for ChapterDetailResponse {
    fn from(value: ChapterWithLikes<'_, Chapter>) -> Self {
        let chapter = value.chapter;
        Self {
            id: chapter.id,
            story_id: chapter.story_id,
            title: chapter.title.clone(),
            slug: chapter.slug.clone(),
            body: chapter.body.clone(),
            author_comment: chapter.author_comment.clone(),
            word_counts: chapter.word_counts,
            likes: value.likes,
            reading_time: chapter.reading_time.clone(),
            is_published: chapter.is_published,
            created_at: chapter.created_at,
            updated_at: chapter.updated_at,
        }
    }
}

impl From<ChapterWithLikes<'_, ChapterWithStory>> for ChapterReadResponse {
    fn from(value: ChapterWithLikes<'_, ChapterWithStory>) -> Self {
        let ChapterWithStory {
            chapter,
            story,
            author,
        } = value.chapter;
        Self {
            id: chapter.id,
            story_id: chapter.story_id,
            story: ChapterStoryResponse {
                id: story.id,
                title: story.title.clone(),
                slug: story.slug.clone(),
            },
            user: AuthorResponse::from(author),
            title: chapter.title.clone(),
            slug: chapter.slug.clone(),
            body: chapter.body.clone(),
            author_comment: chapter.author_comment.clone(),
            likes: value.likes,
            reading_time: chapter.reading_time.clone(),
            updated_at: chapter.updated_at,
        }
    }
}

impl From<ChapterWithLikes<'_, Chapter>> for ChapterSummaryResponse {
    fn from(value: ChapterWithLikes<'_, Chapter>) -> Self {
        let chapter = value.chapter;
        Self {
            id: chapter.id,
            story_id: chapter.story_id,
            title: chapter.title.clone(),
            slug: chapter.slug.clone(),
            word_counts: chapter.word_counts,
            likes: value.likes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storial_core::{EntityId, Gender, Story, StoryRef};

    fn author() -> Author {
        Author {
            id: EntityId::new(7),
            name: "Jane Writer".to_string(),
            username: "janewriter".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    fn story_with_relations(cover: &str) -> StoryWithRelations {
        let mut story = Story::new(
            EntityId::new(42),
            EntityId::new(7),
            EntityId::new(1),
            "The Long Night".to_string(),
            "A story".to_string(),
            false,
            true,
        );
        story.cover = cover.to_string();
        StoryWithRelations {
            story,
            author: author(),
            category: Category::new(EntityId::new(1), "Fantasy".to_string(), "fantasy".to_string()),
        }
    }

    fn chapter() -> Chapter {
        Chapter::new(
            EntityId::new(99),
            EntityId::new(42),
            "Chapter One".to_string(),
            "a".repeat(450),
            "enjoy".to_string(),
            true,
        )
    }

    #[test]
    fn test_auth_user_response() {
        let user = User::new(
            EntityId::new(7),
            "Jane Writer".to_string(),
            "janewriter".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            Gender::Female,
        );
        let response = AuthUserResponse::from(UserWithToken {
            user: &user,
            token: "jwt".to_string(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["token"], "jwt");
        assert_eq!(json["sex"], "Female");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_story_detail_response() {
        let story = story_with_relations("1700000000000.png");
        let response = StoryDetailResponse::from(StoryWithCategoryCount {
            story: &story,
            category_story_counts: 3,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["slug"], "the-long-night-42");
        assert_eq!(json["userId"], 7);
        assert_eq!(json["categoryId"], 1);
        assert_eq!(json["category"]["storyCounts"], 3);
        assert_eq!(json["category"]["slug"], "fantasy");
        assert_eq!(json["cover"], "/api/v1/book_front/1700000000000.png");
        assert_eq!(json["isAdult"], false);
        assert_eq!(json["isPublished"], true);
    }

    #[test]
    fn test_story_without_cover_has_empty_path() {
        let story = story_with_relations("");
        let response = StoryFilterResponse::from(StoryWithCount {
            story: &story,
            chapter_counts: 0,
        });
        assert_eq!(response.cover, "");
        assert_eq!(response.user.username, "janewriter");
    }

    #[test]
    fn test_owned_story_shows_email() {
        let story = story_with_relations("");
        let json = serde_json::to_value(StoryOwnedResponse::from(&story)).unwrap();
        assert_eq!(json["user"]["email"], "jane@example.com");
        assert!(json["user"].get("username").is_none());
    }

    #[test]
    fn test_story_by_slug_response() {
        let story = story_with_relations("");
        let json = serde_json::to_value(StoryBySlugResponse::from(StoryWithChapterTotals {
            story: &story,
            chapter_counts: 2,
            reading_time: "4 Minutes".to_string(),
        }))
        .unwrap();
        assert_eq!(json["chapterCounts"], 2);
        assert_eq!(json["readingTime"], "4 Minutes");
        assert!(json["category"].get("storyCounts").is_none());
    }

    #[test]
    fn test_chapter_detail_response() {
        let chapter = chapter();
        let json = serde_json::to_value(ChapterDetailResponse::from(ChapterWithLikes {
            chapter: &chapter,
            likes: 0,
        }))
        .unwrap();
        assert_eq!(json["storyId"], 42);
        assert_eq!(json["wordCounts"], 450);
        assert_eq!(json["readingTime"], "2 Minutes");
        assert_eq!(json["authorComment"], "enjoy");
        assert_eq!(json["likes"], 0);
    }

    #[test]
    fn test_chapter_read_response() {
        let joined = ChapterWithStory {
            chapter: chapter(),
            story: StoryRef {
                id: EntityId::new(42),
                user_id: EntityId::new(7),
                title: "The Long Night".to_string(),
                slug: "the-long-night-42".to_string(),
            },
            author: author(),
        };
        let response = ChapterReadResponse::from(ChapterWithLikes {
            chapter: &joined,
            likes: 5,
        });
        assert_eq!(response.story.slug, "the-long-night-42");
        assert_eq!(response.user.name, "Jane Writer");
        assert_eq!(response.likes, 5);
    }
}
