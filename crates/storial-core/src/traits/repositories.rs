//! Repository traits (ports) - define the interface for data access
//!
//! Every method runs on a caller-supplied connection `Conn`, which in
//! practice is the connection behind an open transaction. Repositories never
//! begin, commit or roll back on their own; the service that opened the
//! transaction decides its outcome.

use async_trait::async_trait;

use crate::entities::{
    Category, Chapter, ChapterLike, ChapterWithStory, Story, StoryWithRelations, User,
};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Auth (User) Repository
// ============================================================================

#[async_trait]
pub trait AuthRepository<Conn>: Send + Sync
where
    Conn: Send + 'static,
{
    /// Check if an email is already registered
    async fn email_exists(&self, conn: &mut Conn, email: &str) -> RepoResult<bool>;

    /// Check if a username is already taken
    async fn username_exists(&self, conn: &mut Conn, username: &str) -> RepoResult<bool>;

    /// Find user by email
    async fn find_by_email(&self, conn: &mut Conn, email: &str) -> RepoResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, conn: &mut Conn, id: EntityId) -> RepoResult<Option<User>>;

    /// Insert a new user
    async fn create(&self, conn: &mut Conn, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository<Conn>: Send + Sync
where
    Conn: Send + 'static,
{
    /// All categories ordered by name ascending
    async fn find_all(&self, conn: &mut Conn) -> RepoResult<Vec<Category>>;

    /// Find category by ID
    async fn find_by_id(&self, conn: &mut Conn, id: EntityId) -> RepoResult<Option<Category>>;
}

// ============================================================================
// Story Repository
// ============================================================================

/// Ordering applied when listing stories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryFilter {
    /// Newest stories first
    LatestCreated,
    /// Stories whose chapters changed most recently first
    LatestModifiedChapter,
}

impl StoryFilter {
    /// Parse the `filter` query value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "time" => Some(Self::LatestCreated),
            "modified" => Some(Self::LatestModifiedChapter),
            _ => None,
        }
    }
}

#[async_trait]
pub trait StoryRepository<Conn>: Send + Sync
where
    Conn: Send + 'static,
{
    /// Insert a new story
    async fn create(&self, conn: &mut Conn, story: &Story) -> RepoResult<()>;

    /// Update the story currently stored under `(slug, user_id)`
    ///
    /// Returns `false` when no row matched.
    async fn update(
        &self,
        conn: &mut Conn,
        slug: &str,
        user_id: EntityId,
        story: &Story,
    ) -> RepoResult<bool>;

    /// Delete a story owned by `user_id`; returns `false` when no row matched
    async fn delete(&self, conn: &mut Conn, id: EntityId, user_id: EntityId) -> RepoResult<bool>;

    /// Find story by ID
    async fn find_by_id(&self, conn: &mut Conn, id: EntityId) -> RepoResult<Option<Story>>;

    /// Find story by ID with owner and category joined
    async fn find_with_relations(
        &self,
        conn: &mut Conn,
        id: EntityId,
    ) -> RepoResult<Option<StoryWithRelations>>;

    /// Find story by slug with owner and category joined
    async fn find_by_slug(
        &self,
        conn: &mut Conn,
        slug: &str,
    ) -> RepoResult<Option<StoryWithRelations>>;

    /// Find story by slug, only if owned by `user_id`
    async fn find_by_slug_and_user_id(
        &self,
        conn: &mut Conn,
        slug: &str,
        user_id: EntityId,
    ) -> RepoResult<Option<StoryWithRelations>>;

    /// All stories owned by a user, newest first
    async fn find_all_by_user_id(
        &self,
        conn: &mut Conn,
        user_id: EntityId,
    ) -> RepoResult<Vec<StoryWithRelations>>;

    /// All stories, ordered by `filter`
    async fn filter(
        &self,
        conn: &mut Conn,
        filter: StoryFilter,
    ) -> RepoResult<Vec<StoryWithRelations>>;

    /// Stories in one category; `None` lists them without a guaranteed order
    async fn find_by_category_slug(
        &self,
        conn: &mut Conn,
        category_slug: &str,
        filter: Option<StoryFilter>,
    ) -> RepoResult<Vec<StoryWithRelations>>;

    /// Number of stories in a category
    async fn count_by_category_id(&self, conn: &mut Conn, category_id: EntityId)
        -> RepoResult<i64>;
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// Key identifying a chapter through its owner and slugs
#[derive(Debug, Clone, Copy)]
pub struct ChapterUpdateKey<'a> {
    pub user_id: EntityId,
    pub story_slug: &'a str,
    pub chapter_slug: &'a str,
}

#[async_trait]
pub trait ChapterRepository<Conn>: Send + Sync
where
    Conn: Send + 'static,
{
    /// Insert a new chapter
    async fn create(&self, conn: &mut Conn, chapter: &Chapter) -> RepoResult<()>;

    /// Update the row of `chapter.id`, provided `key` still addresses it
    ///
    /// Chapter slugs may repeat within a story, so the id picks the row.
    /// Returns `false` when no row matched.
    async fn update(
        &self,
        conn: &mut Conn,
        key: ChapterUpdateKey<'_>,
        chapter: &Chapter,
    ) -> RepoResult<bool>;

    /// Delete a chapter whose story is owned by `user_id`
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, conn: &mut Conn, user_id: EntityId, chapter_id: EntityId)
        -> RepoResult<bool>;

    /// Find chapter by ID with its story and owner joined
    async fn find_by_id(
        &self,
        conn: &mut Conn,
        id: EntityId,
    ) -> RepoResult<Option<ChapterWithStory>>;

    /// Find a chapter of a story owned by `key.user_id`
    async fn find_by_story_slug_and_chapter_slug(
        &self,
        conn: &mut Conn,
        key: ChapterUpdateKey<'_>,
    ) -> RepoResult<Option<ChapterWithStory>>;

    /// Chapters of a story looked up by slug, oldest first
    async fn find_all_by_story_slug(
        &self,
        conn: &mut Conn,
        story_slug: &str,
    ) -> RepoResult<Vec<Chapter>>;

    /// Chapters of a story looked up by ID, oldest first
    async fn find_all_by_story_id(
        &self,
        conn: &mut Conn,
        story_id: EntityId,
    ) -> RepoResult<Vec<Chapter>>;

    /// Number of chapters in a story
    async fn count_by_story_slug(&self, conn: &mut Conn, story_slug: &str) -> RepoResult<i64>;

    /// Number of chapters across every story a user owns
    async fn count_by_user_id(&self, conn: &mut Conn, user_id: EntityId) -> RepoResult<i64>;

    /// Record a like
    async fn save_like(&self, conn: &mut Conn, like: &ChapterLike) -> RepoResult<()>;

    /// Number of likes on a chapter
    async fn count_likes(&self, conn: &mut Conn, chapter_id: EntityId) -> RepoResult<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_filter_parse() {
        assert_eq!(StoryFilter::parse("time"), Some(StoryFilter::LatestCreated));
        assert_eq!(
            StoryFilter::parse("modified"),
            Some(StoryFilter::LatestModifiedChapter)
        );
        assert_eq!(StoryFilter::parse(""), None);
        assert_eq!(StoryFilter::parse("TIME"), None);
    }
}
