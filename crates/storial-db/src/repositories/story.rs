//! PostgreSQL implementation of StoryRepository

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::instrument;

use storial_core::{
    DomainError, EntityId, RepoResult, Story, StoryFilter, StoryRepository, StoryWithRelations,
};

use crate::models::{StoryModel, StoryRowModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// Story columns followed by the aliased owner and category columns
const STORY_ROW_SELECT: &str = r"
    SELECT s.id, s.user_id, s.category_id, s.title, s.slug, s.description,
           s.is_adult, s.is_published, s.cover, s.created_at, s.updated_at,
           u.name AS author_name, u.username AS author_username, u.email AS author_email,
           c.name AS category_name, c.slug AS category_slug
    FROM stories s
    INNER JOIN users u ON s.user_id = u.id
    INNER JOIN categories c ON s.category_id = c.id
";

/// Join restricting to stories that have chapters, exposing their latest update
const LATEST_CHAPTER_JOIN: &str = r"
    INNER JOIN (
        SELECT story_id, MAX(updated_at) AS last_chapter_update
        FROM chapters
        GROUP BY story_id
    ) lc ON lc.story_id = s.id
";

/// PostgreSQL implementation of StoryRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PgStoryRepository;

impl PgStoryRepository {
    pub fn new() -> Self {
        Self
    }

    async fn fetch_rows(
        conn: &mut PgConnection,
        sql: &str,
        bind: Option<&str>,
    ) -> RepoResult<Vec<StoryWithRelations>> {
        let mut query = sqlx::query_as::<_, StoryRowModel>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&mut *conn).await.map_err(map_db_error)?;
        Ok(rows.into_iter().map(StoryWithRelations::from).collect())
    }
}

#[async_trait]
impl StoryRepository<PgConnection> for PgStoryRepository {
    #[instrument(skip(self, conn, story), fields(story_id = %story.id))]
    async fn create(&self, conn: &mut PgConnection, story: &Story) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO stories (id, user_id, category_id, title, slug, description,
                                 is_adult, is_published, cover, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(story.id.into_inner())
        .bind(story.user_id.into_inner())
        .bind(story.category_id.into_inner())
        .bind(&story.title)
        .bind(&story.slug)
        .bind(&story.description)
        .bind(story.is_adult)
        .bind(story.is_published)
        .bind(&story.cover)
        .bind(story.created_at)
        .bind(story.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::CategoryNotFound))?;

        Ok(())
    }

    #[instrument(skip(self, conn, story), fields(story_id = %story.id))]
    async fn update(
        &self,
        conn: &mut PgConnection,
        slug: &str,
        user_id: EntityId,
        story: &Story,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE stories
            SET category_id = $1, title = $2, slug = $3, description = $4,
                is_adult = $5, is_published = $6, cover = $7, updated_at = $8
            WHERE slug = $9 AND user_id = $10
            ",
        )
        .bind(story.category_id.into_inner())
        .bind(&story.title)
        .bind(&story.slug)
        .bind(&story.description)
        .bind(story.is_adult)
        .bind(story.is_published)
        .bind(&story.cover)
        .bind(story.updated_at)
        .bind(slug)
        .bind(user_id.into_inner())
        .execute(&mut *conn)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::CategoryNotFound))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, conn))]
    async fn delete(
        &self,
        conn: &mut PgConnection,
        id: EntityId,
        user_id: EntityId,
    ) -> RepoResult<bool> {
        let result = sqlx::query(r"DELETE FROM stories WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, conn))]
    async fn find_by_id(&self, conn: &mut PgConnection, id: EntityId) -> RepoResult<Option<Story>> {
        let row = sqlx::query_as::<_, StoryModel>(
            r"
            SELECT id, user_id, category_id, title, slug, description,
                   is_adult, is_published, cover, created_at, updated_at
            FROM stories
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Story::from))
    }

    #[instrument(skip(self, conn))]
    async fn find_with_relations(
        &self,
        conn: &mut PgConnection,
        id: EntityId,
    ) -> RepoResult<Option<StoryWithRelations>> {
        let sql = format!("{STORY_ROW_SELECT} WHERE s.id = $1");
        let row = sqlx::query_as::<_, StoryRowModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(StoryWithRelations::from))
    }

    #[instrument(skip(self, conn))]
    async fn find_by_slug(
        &self,
        conn: &mut PgConnection,
        slug: &str,
    ) -> RepoResult<Option<StoryWithRelations>> {
        let sql = format!("{STORY_ROW_SELECT} WHERE s.slug = $1");
        let row = sqlx::query_as::<_, StoryRowModel>(&sql)
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(StoryWithRelations::from))
    }

    #[instrument(skip(self, conn))]
    async fn find_by_slug_and_user_id(
        &self,
        conn: &mut PgConnection,
        slug: &str,
        user_id: EntityId,
    ) -> RepoResult<Option<StoryWithRelations>> {
        let sql = format!("{STORY_ROW_SELECT} WHERE s.slug = $1 AND s.user_id = $2");
        let row = sqlx::query_as::<_, StoryRowModel>(&sql)
            .bind(slug)
            .bind(user_id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(StoryWithRelations::from))
    }

    #[instrument(skip(self, conn))]
    async fn find_all_by_user_id(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
    ) -> RepoResult<Vec<StoryWithRelations>> {
        let sql = format!("{STORY_ROW_SELECT} WHERE s.user_id = $1 ORDER BY s.created_at DESC");
        let rows = sqlx::query_as::<_, StoryRowModel>(&sql)
            .bind(user_id.into_inner())
            .fetch_all(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(StoryWithRelations::from).collect())
    }

    #[instrument(skip(self, conn))]
    async fn filter(
        &self,
        conn: &mut PgConnection,
        filter: StoryFilter,
    ) -> RepoResult<Vec<StoryWithRelations>> {
        let sql = match filter {
            StoryFilter::LatestCreated => {
                format!("{STORY_ROW_SELECT} ORDER BY s.created_at DESC")
            }
            StoryFilter::LatestModifiedChapter => format!(
                "{STORY_ROW_SELECT} {LATEST_CHAPTER_JOIN} ORDER BY lc.last_chapter_update DESC"
            ),
        };

        Self::fetch_rows(conn, &sql, None).await
    }

    #[instrument(skip(self, conn))]
    async fn find_by_category_slug(
        &self,
        conn: &mut PgConnection,
        category_slug: &str,
        filter: Option<StoryFilter>,
    ) -> RepoResult<Vec<StoryWithRelations>> {
        let sql = match filter {
            Some(StoryFilter::LatestCreated) => {
                format!("{STORY_ROW_SELECT} WHERE c.slug = $1 ORDER BY s.created_at DESC")
            }
            Some(StoryFilter::LatestModifiedChapter) => format!(
                "{STORY_ROW_SELECT} {LATEST_CHAPTER_JOIN} WHERE c.slug = $1 \
                 ORDER BY lc.last_chapter_update DESC"
            ),
            None => format!("{STORY_ROW_SELECT} WHERE c.slug = $1"),
        };

        Self::fetch_rows(conn, &sql, Some(category_slug)).await
    }

    #[instrument(skip(self, conn))]
    async fn count_by_category_id(
        &self,
        conn: &mut PgConnection,
        category_id: EntityId,
    ) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(r"SELECT COUNT(*) FROM stories WHERE category_id = $1")
            .bind(category_id.into_inner())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)
    }
}
