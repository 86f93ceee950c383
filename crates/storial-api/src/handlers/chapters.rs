//! Chapter handlers

use axum::extract::{Path, State};
use storial_service::{
    dto::{
        ChapterDetailResponse, ChapterReadResponse, ChapterSummaryResponse, CreateChapterRequest,
        StatusResponse, UpdateChapterRequest,
    },
    ChapterService,
};

use crate::extractors::{AuthUser, ChapterIdPath, FormData, StoryChapterIdPath, StoryIdPath};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Add a chapter to one of the caller's stories
///
/// POST /add-chapter/:story_slug
pub async fn create_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_slug): Path<String>,
    form: FormData<CreateChapterRequest>,
) -> ApiResult<ApiResponse<ChapterDetailResponse>> {
    let service = ChapterService::new(state.service_context());
    let chapter = service
        .add_chapter(auth.user_id, &story_slug, form.fields)
        .await?;
    Ok(ApiResponse::created(chapter))
}

/// Rewrite a chapter of one of the caller's stories
///
/// PUT/PATCH /edit-chapter/:story_slug/:chapter_slug
pub async fn update_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((story_slug, chapter_slug)): Path<(String, String)>,
    form: FormData<UpdateChapterRequest>,
) -> ApiResult<ApiResponse<ChapterDetailResponse>> {
    let service = ChapterService::new(state.service_context());
    let chapter = service
        .edit_chapter(auth.user_id, &story_slug, &chapter_slug, form.fields)
        .await?;
    Ok(ApiResponse::ok(chapter))
}

/// Read a chapter of one of the caller's stories
///
/// GET /book/:story_slug/:chapter_slug
pub async fn get_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((story_slug, chapter_slug)): Path<(String, String)>,
) -> ApiResult<ApiResponse<ChapterReadResponse>> {
    let service = ChapterService::new(state.service_context());
    let chapter = service
        .get_chapter_by_story_slug_and_chapter_slug(
            auth.user_id,
            &story_slug,
            &chapter_slug,
        )
        .await?;
    Ok(ApiResponse::ok(chapter))
}

/// Delete a chapter of one of the caller's stories
///
/// DELETE /writers/chapter/:chapter_id/delete
pub async fn delete_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ChapterIdPath>,
) -> ApiResult<ApiResponse<StatusResponse>> {
    let chapter_id = path.chapter_id()?;
    let service = ChapterService::new(state.service_context());
    let status = service.remove_chapter(auth.user_id, chapter_id).await?;
    Ok(ApiResponse::ok(status))
}

/// List the chapters of a story with like counts
///
/// GET /books/:story_id/chapters
pub async fn get_chapters(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<StoryIdPath>,
) -> ApiResult<ApiResponse<Vec<ChapterSummaryResponse>>> {
    let story_id = path.story_id()?;
    let service = ChapterService::new(state.service_context());
    let chapters = service.get_all_chapter_by_story_id(story_id).await?;
    Ok(ApiResponse::ok(chapters))
}

/// Like a chapter
///
/// POST /books/:story_id/chapters/:chapter_id/votes/up
pub async fn like_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<StoryChapterIdPath>,
) -> ApiResult<ApiResponse<StatusResponse>> {
    let story_id = path.story_id()?;
    let chapter_id = path.chapter_id()?;
    let service = ChapterService::new(state.service_context());
    let status = service
        .like_chapter(story_id, chapter_id, auth.user_id)
        .await?;
    Ok(ApiResponse::ok(status))
}
