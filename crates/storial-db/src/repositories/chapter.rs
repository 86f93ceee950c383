//! PostgreSQL implementation of ChapterRepository

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::instrument;

use storial_core::{
    Chapter, ChapterLike, ChapterRepository, ChapterUpdateKey, ChapterWithStory, EntityId,
    RepoResult,
};

use crate::mappers::word_counts_to_db;
use crate::models::{ChapterModel, ChapterRowModel};

use super::error::map_db_error;

const CHAPTER_COLUMNS: &str = r"
    ch.id, ch.story_id, ch.title, ch.slug, ch.body, ch.author_comment,
    ch.word_counts, ch.reading_time, ch.is_published, ch.created_at, ch.updated_at
";

/// Chapter joined with its story and the story's owner
const CHAPTER_ROW_FROM: &str = r"
    s.user_id AS story_user_id, s.title AS story_title, s.slug AS story_slug,
    u.name AS author_name, u.username AS author_username, u.email AS author_email
    FROM chapters ch
    INNER JOIN stories s ON ch.story_id = s.id
    INNER JOIN users u ON s.user_id = u.id
";

/// PostgreSQL implementation of ChapterRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PgChapterRepository;

impl PgChapterRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChapterRepository<PgConnection> for PgChapterRepository {
    #[instrument(skip(self, conn, chapter), fields(chapter_id = %chapter.id))]
    async fn create(&self, conn: &mut PgConnection, chapter: &Chapter) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO chapters (id, story_id, title, slug, body, author_comment,
                                  word_counts, reading_time, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(chapter.id.into_inner())
        .bind(chapter.story_id.into_inner())
        .bind(&chapter.title)
        .bind(&chapter.slug)
        .bind(&chapter.body)
        .bind(&chapter.author_comment)
        .bind(word_counts_to_db(chapter.word_counts))
        .bind(&chapter.reading_time)
        .bind(chapter.is_published)
        .bind(chapter.created_at)
        .bind(chapter.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, conn, chapter), fields(chapter_id = %chapter.id))]
    async fn update(
        &self,
        conn: &mut PgConnection,
        key: ChapterUpdateKey<'_>,
        chapter: &Chapter,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE chapters ch
            SET title = $1, slug = $2, body = $3, author_comment = $4,
                word_counts = $5, reading_time = $6, is_published = $7, updated_at = $8
            FROM stories s
            WHERE ch.story_id = s.id AND s.user_id = $9 AND s.slug = $10 AND ch.slug = $11
              AND ch.id = $12
            ",
        )
        .bind(&chapter.title)
        .bind(&chapter.slug)
        .bind(&chapter.body)
        .bind(&chapter.author_comment)
        .bind(word_counts_to_db(chapter.word_counts))
        .bind(&chapter.reading_time)
        .bind(chapter.is_published)
        .bind(chapter.updated_at)
        .bind(key.user_id.into_inner())
        .bind(key.story_slug)
        .bind(key.chapter_slug)
        .bind(chapter.id.into_inner())
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, conn))]
    async fn delete(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        chapter_id: EntityId,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM chapters ch
            USING stories s
            WHERE ch.story_id = s.id AND s.user_id = $1 AND ch.id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(chapter_id.into_inner())
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, conn))]
    async fn find_by_id(
        &self,
        conn: &mut PgConnection,
        id: EntityId,
    ) -> RepoResult<Option<ChapterWithStory>> {
        let sql = format!("SELECT {CHAPTER_COLUMNS}, {CHAPTER_ROW_FROM} WHERE ch.id = $1");
        let row = sqlx::query_as::<_, ChapterRowModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(ChapterWithStory::from))
    }

    #[instrument(skip(self, conn))]
    async fn find_by_story_slug_and_chapter_slug(
        &self,
        conn: &mut PgConnection,
        key: ChapterUpdateKey<'_>,
    ) -> RepoResult<Option<ChapterWithStory>> {
        // Chapter slugs are only unique by convention; the oldest match wins
        let sql = format!(
            "SELECT {CHAPTER_COLUMNS}, {CHAPTER_ROW_FROM} \
             WHERE s.user_id = $1 AND s.slug = $2 AND ch.slug = $3 \
             ORDER BY ch.created_at ASC LIMIT 1"
        );
        let row = sqlx::query_as::<_, ChapterRowModel>(&sql)
            .bind(key.user_id.into_inner())
            .bind(key.story_slug)
            .bind(key.chapter_slug)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(ChapterWithStory::from))
    }

    #[instrument(skip(self, conn))]
    async fn find_all_by_story_slug(
        &self,
        conn: &mut PgConnection,
        story_slug: &str,
    ) -> RepoResult<Vec<Chapter>> {
        let sql = format!(
            "SELECT {CHAPTER_COLUMNS} FROM chapters ch \
             INNER JOIN stories s ON ch.story_id = s.id \
             WHERE s.slug = $1 ORDER BY ch.created_at ASC"
        );
        let rows = sqlx::query_as::<_, ChapterModel>(&sql)
            .bind(story_slug)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Chapter::from).collect())
    }

    #[instrument(skip(self, conn))]
    async fn find_all_by_story_id(
        &self,
        conn: &mut PgConnection,
        story_id: EntityId,
    ) -> RepoResult<Vec<Chapter>> {
        let sql = format!(
            "SELECT {CHAPTER_COLUMNS} FROM chapters ch \
             WHERE ch.story_id = $1 ORDER BY ch.created_at ASC"
        );
        let rows = sqlx::query_as::<_, ChapterModel>(&sql)
            .bind(story_id.into_inner())
            .fetch_all(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Chapter::from).collect())
    }

    #[instrument(skip(self, conn))]
    async fn count_by_story_slug(&self, conn: &mut PgConnection, story_slug: &str) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM chapters ch
            INNER JOIN stories s ON ch.story_id = s.id
            WHERE s.slug = $1
            ",
        )
        .bind(story_slug)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, conn))]
    async fn count_by_user_id(&self, conn: &mut PgConnection, user_id: EntityId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM chapters ch
            INNER JOIN stories s ON ch.story_id = s.id
            WHERE s.user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, conn))]
    async fn save_like(&self, conn: &mut PgConnection, like: &ChapterLike) -> RepoResult<()> {
        sqlx::query(
            r"INSERT INTO chapter_likes (chapter_id, user_id, created_at) VALUES ($1, $2, $3)",
        )
        .bind(like.chapter_id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.created_at)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, conn))]
    async fn count_likes(&self, conn: &mut PgConnection, chapter_id: EntityId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(r"SELECT COUNT(*) FROM chapter_likes WHERE chapter_id = $1")
            .bind(chapter_id.into_inner())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)
    }
}
