//! Story service
//!
//! Stories own their cover file. Covers are written before the database
//! changes commit and removed again when the transaction fails; replaced or
//! orphaned covers are only deleted once the commit succeeded.

use sqlx::PgConnection;
use storial_core::{DomainError, EntityId, Story, StoryFilter, StoryWithRelations};
use storial_db::{begin, commit_or_rollback};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{
    CreateStoryRequest, StatusResponse, StoryByCategoryResponse, StoryBySlugResponse,
    StoryDetailResponse, StoryFilterResponse, StoryOwnedResponse, StoryWithCategoryCount,
    StoryWithChapterTotals, StoryWithCount, UpdateStoryRequest,
};

use super::chapter::ChapterService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::file::FileService;

/// Story service
pub struct StoryService<'a> {
    ctx: &'a ServiceContext,
}

/// Cover files touched by a write, settled after the transaction ends
#[derive(Debug, Default)]
struct CoverChange {
    uploaded: Option<String>,
    replaced: Option<String>,
}

impl<'a> StoryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a story owned by `user_id`
    #[instrument(skip(self, request), fields(user_id = %user_id, title = %request.title))]
    pub async fn add_story(
        &self,
        user_id: EntityId,
        request: CreateStoryRequest,
    ) -> ServiceResult<StoryDetailResponse> {
        let mut covers = CoverChange::default();
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.add_story_in(&mut tx, user_id, request, &mut covers).await;
        let result = commit_or_rollback(tx, result).await;
        self.settle_covers(covers, result.is_ok()).await;
        result
    }

    async fn add_story_in(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        request: CreateStoryRequest,
        covers: &mut CoverChange,
    ) -> ServiceResult<StoryDetailResponse> {
        request.validate()?;
        let category_id = request.category_id()?;
        let is_adult = request.is_adult()?;
        let is_published = request.is_published()?;

        let mut story = Story::new(
            self.ctx.generate_id(),
            user_id,
            category_id,
            request.title,
            request.description,
            is_adult,
            is_published,
        );

        if let Some(cover) = &request.cover {
            let filename = self
                .ctx
                .file_service()
                .upload(&cover.file_name, &cover.bytes)
                .await?;
            covers.uploaded = Some(filename.clone());
            story.cover = filename;
        }

        self.ctx.story_repo().create(&mut *conn, &story).await?;

        info!(story_id = %story.id, slug = %story.slug, "Story created");

        self.detail(conn, story.id).await
    }

    /// Update a story addressed by its slug and owner
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn edit_story(
        &self,
        user_id: EntityId,
        slug: &str,
        request: UpdateStoryRequest,
    ) -> ServiceResult<StoryDetailResponse> {
        let mut covers = CoverChange::default();
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self
            .edit_story_in(&mut tx, user_id, slug, request, &mut covers)
            .await;
        let result = commit_or_rollback(tx, result).await;
        self.settle_covers(covers, result.is_ok()).await;
        result
    }

    async fn edit_story_in(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        slug: &str,
        request: UpdateStoryRequest,
        covers: &mut CoverChange,
    ) -> ServiceResult<StoryDetailResponse> {
        request.validate()?;
        let category_id = request.category_id()?;
        let is_adult = request.is_adult()?;
        let is_published = request.is_published()?;

        let mut story = self
            .ctx
            .story_repo()
            .find_by_slug_and_user_id(&mut *conn, slug, user_id)
            .await?
            .ok_or(DomainError::StoryNotFound)?
            .story;

        story.revise(
            category_id,
            request.title,
            request.description,
            is_adult,
            is_published,
        );

        if let Some(cover) = &request.cover {
            let filename = self
                .ctx
                .file_service()
                .upload(&cover.file_name, &cover.bytes)
                .await?;
            covers.uploaded = Some(filename.clone());
            if story.has_cover() {
                covers.replaced = Some(std::mem::take(&mut story.cover));
            }
            story.cover = filename;
        }

        if !self
            .ctx
            .story_repo()
            .update(&mut *conn, slug, user_id, &story)
            .await?
        {
            return Err(DomainError::StoryNotFound.into());
        }

        info!(story_id = %story.id, slug = %story.slug, "Story updated");

        self.detail(conn, story.id).await
    }

    /// Delete a story owned by `user_id`, along with its chapters and cover
    #[instrument(skip(self))]
    pub async fn remove_story(
        &self,
        user_id: EntityId,
        story_id: EntityId,
    ) -> ServiceResult<StatusResponse> {
        let mut covers = CoverChange::default();
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self
            .remove_story_in(&mut tx, user_id, story_id, &mut covers)
            .await;
        let result = commit_or_rollback(tx, result).await;
        self.settle_covers(covers, result.is_ok()).await;
        result
    }

    async fn remove_story_in(
        &self,
        conn: &mut PgConnection,
        user_id: EntityId,
        story_id: EntityId,
        covers: &mut CoverChange,
    ) -> ServiceResult<StatusResponse> {
        let story = self
            .ctx
            .story_repo()
            .find_by_id(&mut *conn, story_id)
            .await?
            .filter(|s| s.is_owned_by(user_id))
            .ok_or(DomainError::StoryNotFound)?;

        if !self
            .ctx
            .story_repo()
            .delete(&mut *conn, story_id, user_id)
            .await?
        {
            return Err(DomainError::StoryNotFound.into());
        }

        if story.has_cover() {
            covers.replaced = Some(story.cover);
        }

        info!("Story deleted");
        Ok(StatusResponse::ok())
    }

    /// The caller's own stories, newest first
    #[instrument(skip(self))]
    pub async fn get_all_story(&self, user_id: EntityId) -> ServiceResult<Vec<StoryOwnedResponse>> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result: ServiceResult<Vec<StoryOwnedResponse>> = self
            .ctx
            .story_repo()
            .find_all_by_user_id(&mut *tx, user_id)
            .await
            .map(|stories| stories.iter().map(StoryOwnedResponse::from).collect())
            .map_err(Into::into);
        commit_or_rollback(tx, result).await
    }

    /// Story page with chapter count and total reading time
    #[instrument(skip(self))]
    pub async fn get_story_by_slug(&self, slug: &str) -> ServiceResult<StoryBySlugResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.get_story_by_slug_in(&mut tx, slug).await;
        commit_or_rollback(tx, result).await
    }

    async fn get_story_by_slug_in(
        &self,
        conn: &mut PgConnection,
        slug: &str,
    ) -> ServiceResult<StoryBySlugResponse> {
        let story = self
            .ctx
            .story_repo()
            .find_by_slug(&mut *conn, slug)
            .await?
            .ok_or(DomainError::StoryNotFound)?;

        let chapter_counts = self
            .ctx
            .chapter_repo()
            .count_by_story_slug(&mut *conn, &story.story.slug)
            .await?;
        let chapters = self
            .ctx
            .chapter_repo()
            .find_all_by_story_slug(&mut *conn, &story.story.slug)
            .await?;

        Ok(StoryWithChapterTotals {
            story: &story,
            chapter_counts,
            reading_time: ChapterService::calculate_reading_time_by_chapters(&chapters),
        }
        .into())
    }

    /// All stories, ordered by `filter`
    ///
    /// `"time"` orders by creation; anything else by latest chapter update.
    #[instrument(skip(self))]
    pub async fn filter_story(&self, filter: &str) -> ServiceResult<Vec<StoryFilterResponse>> {
        let filter = StoryFilter::parse(filter).unwrap_or(StoryFilter::LatestModifiedChapter);

        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.filter_story_in(&mut tx, filter).await;
        commit_or_rollback(tx, result).await
    }

    async fn filter_story_in(
        &self,
        conn: &mut PgConnection,
        filter: StoryFilter,
    ) -> ServiceResult<Vec<StoryFilterResponse>> {
        let stories = self.ctx.story_repo().filter(&mut *conn, filter).await?;
        self.with_chapter_counts(conn, &stories).await
    }

    /// Stories of one category, ordered by `filter`
    ///
    /// Values other than `"time"` and `"modified"` list the category unordered.
    #[instrument(skip(self))]
    pub async fn filter_story_by_category_slug(
        &self,
        category_slug: &str,
        filter: &str,
    ) -> ServiceResult<Vec<StoryByCategoryResponse>> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self
            .by_category_in(&mut tx, category_slug, StoryFilter::parse(filter))
            .await;
        commit_or_rollback(tx, result).await
    }

    /// Stories of one category without ordering guarantees
    #[instrument(skip(self))]
    pub async fn get_story_by_category_slug(
        &self,
        category_slug: &str,
    ) -> ServiceResult<Vec<StoryByCategoryResponse>> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.by_category_in(&mut tx, category_slug, None).await;
        commit_or_rollback(tx, result).await
    }

    async fn by_category_in(
        &self,
        conn: &mut PgConnection,
        category_slug: &str,
        filter: Option<StoryFilter>,
    ) -> ServiceResult<Vec<StoryByCategoryResponse>> {
        let stories = self
            .ctx
            .story_repo()
            .find_by_category_slug(&mut *conn, category_slug, filter)
            .await?;
        self.with_chapter_counts(conn, &stories).await
    }

    /// Raw bytes of a stored cover image
    ///
    /// Every failure, including a name that escapes the cover directory,
    /// is reported as a missing cover.
    #[instrument(skip(self))]
    pub async fn load_story_image_cover(&self, filename: &str) -> ServiceResult<Vec<u8>> {
        if !FileService::is_safe_filename(filename) {
            warn!("Rejected cover filename");
            return Err(DomainError::CoverImageNotFound.into());
        }

        let files = self.ctx.file_service();
        files.get(&files.full_path(filename)).await.map_err(|e| {
            debug!(error = %e, "Cover not readable");
            DomainError::CoverImageNotFound.into()
        })
    }

    // ------------------------------------------------------------------------

    /// Re-read a story with its relations and build the detail response
    async fn detail(
        &self,
        conn: &mut PgConnection,
        story_id: EntityId,
    ) -> ServiceResult<StoryDetailResponse> {
        let story = self
            .ctx
            .story_repo()
            .find_with_relations(&mut *conn, story_id)
            .await?
            .ok_or(DomainError::StoryNotFound)?;
        let category_story_counts = self
            .ctx
            .story_repo()
            .count_by_category_id(&mut *conn, story.category.id)
            .await?;

        Ok(StoryWithCategoryCount {
            story: &story,
            category_story_counts,
        }
        .into())
    }

    async fn with_chapter_counts<R>(
        &self,
        conn: &mut PgConnection,
        stories: &[StoryWithRelations],
    ) -> ServiceResult<Vec<R>>
    where
        R: for<'s> From<StoryWithCount<'s>>,
    {
        let mut responses = Vec::with_capacity(stories.len());
        for story in stories {
            let chapter_counts = self
                .ctx
                .chapter_repo()
                .count_by_story_slug(&mut *conn, &story.story.slug)
                .await?;
            responses.push(R::from(StoryWithCount {
                story,
                chapter_counts,
            }));
        }
        Ok(responses)
    }

    /// Drop the cover files a finished write no longer references
    async fn settle_covers(&self, covers: CoverChange, committed: bool) {
        let files = self.ctx.file_service();
        if committed {
            if let Some(old) = covers.replaced {
                files.remove_file(&old).await;
            }
        } else if let Some(new) = covers.uploaded {
            files.remove_file(&new).await;
        }
    }
}
