//! Chapter service
//!
//! Chapter mutations are scoped to the owner of the chapter's story.

use sqlx::PgConnection;
use storial_core::{Chapter, ChapterLike, ChapterUpdateKey, DomainError, EntityId};
use storial_db::{begin, commit_or_rollback};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{
    ChapterDetailResponse, ChapterReadResponse, ChapterSummaryResponse, ChapterWithLikes,
    CreateChapterRequest, StatusResponse, UpdateChapterRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Chapter service
pub struct ChapterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChapterService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Total reading time of a set of chapters, e.g. "3 Minutes"
    pub fn calculate_reading_time_by_chapters(chapters: &[Chapter]) -> String {
        Chapter::total_reading_time(chapters)
    }

    /// Add a chapter to a story owned by `user_id`
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn add_chapter(
        &self,
        user_id: EntityId,
        story_slug: &str,
        request: CreateChapterRequest,
    ) -> ServiceResult<ChapterDetailResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.add_chapter_in(&mut tx, user_id, story_slug, request).await;
        commit_or_rollback(tx, result).await
    }

    async fn add_chapter_in(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        story_slug: &str,
        request: CreateChapterRequest,
    ) -> ServiceResult<ChapterDetailResponse> {
        request.validate()?;
        let is_published = request.is_published()?;

        let story = self
            .ctx
            .story_repo()
            .find_by_slug_and_user_id(&mut *conn, story_slug, user_id)
            .await?
            .ok_or(DomainError::StoryNotFound)?;

        let chapter = Chapter::new(
            self.ctx.generate_id(),
            story.story.id,
            request.title,
            request.body,
            request.author_comment,
            is_published,
        );
        self.ctx.chapter_repo().create(&mut *conn, &chapter).await?;

        info!(chapter_id = %chapter.id, story_id = %chapter.story_id, "Chapter created");

        Ok(ChapterWithLikes {
            chapter: &chapter,
            likes: 0,
        }
        .into())
    }

    /// Rewrite a chapter addressed by its story and chapter slugs
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn edit_chapter(
        &self,
        user_id: EntityId,
        story_slug: &str,
        chapter_slug: &str,
        request: UpdateChapterRequest,
    ) -> ServiceResult<ChapterDetailResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self
            .edit_chapter_in(&mut tx, user_id, story_slug, chapter_slug, request)
            .await;
        commit_or_rollback(tx, result).await
    }

    async fn edit_chapter_in(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        story_slug: &str,
        chapter_slug: &str,
        request: UpdateChapterRequest,
    ) -> ServiceResult<ChapterDetailResponse> {
        request.validate()?;
        let is_published = request.is_published()?;

        self.ctx
            .story_repo()
            .find_by_slug_and_user_id(&mut *conn, story_slug, user_id)
            .await?
            .ok_or(DomainError::StoryNotFound)?;

        let key = ChapterUpdateKey {
            user_id,
            story_slug,
            chapter_slug,
        };
        let existing = self
            .ctx
            .chapter_repo()
            .find_by_story_slug_and_chapter_slug(&mut *conn, key)
            .await?
            .ok_or(DomainError::ChapterNotFound)?;

        let mut chapter = existing.chapter;
        let keep_published = chapter.is_published;
        chapter.revise(
            request.title,
            request.body,
            request.author_comment,
            is_published.unwrap_or(keep_published),
        );

        if !self.ctx.chapter_repo().update(&mut *conn, key, &chapter).await? {
            return Err(DomainError::ChapterNotFound.into());
        }

        let updated = self
            .ctx
            .chapter_repo()
            .find_by_id(&mut *conn, chapter.id)
            .await?
            .ok_or(DomainError::ChapterNotFound)?;
        let likes = self.ctx.chapter_repo().count_likes(&mut *conn, chapter.id).await?;

        info!(chapter_id = %chapter.id, slug = %updated.chapter.slug, "Chapter updated");

        Ok(ChapterWithLikes {
            chapter: &updated.chapter,
            likes,
        }
        .into())
    }

    /// Read one chapter of a story owned by `user_id`
    #[instrument(skip(self))]
    pub async fn get_chapter_by_story_slug_and_chapter_slug(
        &self,
        user_id: EntityId,
        story_slug: &str,
        chapter_slug: &str,
    ) -> ServiceResult<ChapterReadResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self
            .get_chapter_in(&mut tx, user_id, story_slug, chapter_slug)
            .await;
        commit_or_rollback(tx, result).await
    }

    async fn get_chapter_in(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        story_slug: &str,
        chapter_slug: &str,
    ) -> ServiceResult<ChapterReadResponse> {
        self.ctx
            .story_repo()
            .find_by_slug_and_user_id(&mut *conn, story_slug, user_id)
            .await?
            .ok_or(DomainError::StoryNotFound)?;

        let key = ChapterUpdateKey {
            user_id,
            story_slug,
            chapter_slug,
        };
        let chapter = self
            .ctx
            .chapter_repo()
            .find_by_story_slug_and_chapter_slug(&mut *conn, key)
            .await?
            .ok_or(DomainError::ChapterNotFound)?;
        let likes = self
            .ctx
            .chapter_repo()
            .count_likes(&mut *conn, chapter.chapter.id)
            .await?;

        Ok(ChapterWithLikes {
            chapter: &chapter,
            likes,
        }
        .into())
    }

    /// Delete a chapter; only the owner of its story may do so
    #[instrument(skip(self))]
    pub async fn remove_chapter(
        &self,
        user_id: EntityId,
        chapter_id: EntityId,
    ) -> ServiceResult<StatusResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.remove_chapter_in(&mut tx, user_id, chapter_id).await;
        commit_or_rollback(tx, result).await
    }

    async fn remove_chapter_in(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        chapter_id: EntityId,
    ) -> ServiceResult<StatusResponse> {
        let chapter = self
            .ctx
            .chapter_repo()
            .find_by_id(&mut *conn, chapter_id)
            .await?
            .ok_or(DomainError::ChapterNotFound)?;

        if chapter.story.user_id != user_id {
            warn!(owner_id = %chapter.story.user_id, "Chapter delete rejected: not the owner");
            return Err(DomainError::NotChapterOwner.into());
        }

        if !self
            .ctx
            .chapter_repo()
            .delete(&mut *conn, user_id, chapter_id)
            .await?
        {
            return Err(DomainError::ChapterNotFound.into());
        }

        info!("Chapter deleted");
        Ok(StatusResponse::ok())
    }

    /// Record a like from `user_id`; authors cannot like their own chapters
    #[instrument(skip(self))]
    pub async fn like_chapter(
        &self,
        story_id: EntityId,
        chapter_id: EntityId,
        user_id: EntityId,
    ) -> ServiceResult<StatusResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.like_chapter_in(&mut tx, story_id, chapter_id, user_id).await;
        commit_or_rollback(tx, result).await
    }

    async fn like_chapter_in(
        &self,
        conn: &mut PgConnection,
        story_id: EntityId,
        chapter_id: EntityId,
        user_id: EntityId,
    ) -> ServiceResult<StatusResponse> {
        self.ctx
            .story_repo()
            .find_by_id(&mut *conn, story_id)
            .await?
            .ok_or(DomainError::StoryNotFound)?;

        let chapter = self
            .ctx
            .chapter_repo()
            .find_by_id(&mut *conn, chapter_id)
            .await?
            .filter(|c| c.story.id == story_id)
            .ok_or(DomainError::ChapterNotFound)?;

        if chapter.story.user_id == user_id {
            return Err(DomainError::CannotLikeOwnChapter.into());
        }

        self.ctx
            .chapter_repo()
            .save_like(&mut *conn, &ChapterLike::new(chapter_id, user_id))
            .await?;

        debug!("Chapter liked");
        Ok(StatusResponse::ok())
    }

    /// Chapters of a story by slug, oldest first
    ///
    /// Like counts are not loaded here and are reported as zero.
    #[instrument(skip(self))]
    pub async fn get_all_chapter_by_story_slug(
        &self,
        story_slug: &str,
    ) -> ServiceResult<Vec<ChapterSummaryResponse>> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result: ServiceResult<Vec<ChapterSummaryResponse>> = self
            .ctx
            .chapter_repo()
            .find_all_by_story_slug(&mut *tx, story_slug)
            .await
            .map(|chapters| {
                chapters
                    .iter()
                    .map(|chapter| ChapterWithLikes { chapter, likes: 0 }.into())
                    .collect()
            })
            .map_err(Into::into);
        commit_or_rollback(tx, result).await
    }

    /// Chapters of a story by id, oldest first, with like counts
    #[instrument(skip(self))]
    pub async fn get_all_chapter_by_story_id(
        &self,
        story_id: EntityId,
    ) -> ServiceResult<Vec<ChapterSummaryResponse>> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.get_all_by_story_id_in(&mut tx, story_id).await;
        commit_or_rollback(tx, result).await
    }

    async fn get_all_by_story_id_in(
        &self,
        conn: &mut PgConnection,
        story_id: EntityId,
    ) -> ServiceResult<Vec<ChapterSummaryResponse>> {
        self.ctx
            .story_repo()
            .find_by_id(&mut *conn, story_id)
            .await?
            .ok_or(DomainError::StoryNotFound)?;

        let chapters = self
            .ctx
            .chapter_repo()
            .find_all_by_story_id(&mut *conn, story_id)
            .await?;

        let mut responses = Vec::with_capacity(chapters.len());
        for chapter in &chapters {
            let likes = self.ctx.chapter_repo().count_likes(&mut *conn, chapter.id).await?;
            responses.push(ChapterWithLikes { chapter, likes }.into());
        }
        Ok(responses)
    }

    /// Number of chapters across every story a user owns
    #[instrument(skip(self))]
    pub async fn count_chapters_by_user(&self, user_id: EntityId) -> ServiceResult<i64> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result: ServiceResult<i64> = self
            .ctx
            .chapter_repo()
            .count_by_user_id(&mut *tx, user_id)
            .await
            .map_err(Into::into);
        commit_or_rollback(tx, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter_with_chars(n: usize) -> Chapter {
        Chapter::new(
            EntityId::new(1),
            EntityId::new(2),
            "Some Chapter".to_string(),
            "x".repeat(n),
            String::new(),
            true,
        )
    }

    #[test]
    fn test_reading_time_sums_before_dividing() {
        let chapters = vec![chapter_with_chars(199), chapter_with_chars(199)];
        assert_eq!(
            ChapterService::calculate_reading_time_by_chapters(&chapters),
            "1 Minutes"
        );
    }

    #[test]
    fn test_reading_time_of_nothing() {
        assert_eq!(ChapterService::calculate_reading_time_by_chapters(&[]), "0 Minutes");
    }
}
