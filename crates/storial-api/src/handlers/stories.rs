//! Story handlers
//!
//! Endpoints for writing, listing and reading stories, plus the public
//! cover image route.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storial_service::{
    dto::{
        StatusResponse, StoryByCategoryResponse, StoryBySlugResponse, StoryDetailResponse,
        StoryFilterResponse, StoryFormRequest, StoryOwnedResponse,
    },
    StoryService,
};

use crate::extractors::{AuthUser, DeleteStoryPath, FormData};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// `?filter=` query of the listing routes
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

impl FilterQuery {
    fn value(&self) -> &str {
        self.filter.as_deref().unwrap_or_default()
    }
}

fn story_request(form: FormData<StoryFormRequest>) -> StoryFormRequest {
    let mut request = form.fields;
    request.cover = form.cover;
    request
}

/// Create a story
///
/// POST /add-book
pub async fn create_story(
    State(state): State<AppState>,
    auth: AuthUser,
    form: FormData<StoryFormRequest>,
) -> ApiResult<ApiResponse<StoryDetailResponse>> {
    let service = StoryService::new(state.service_context());
    let story = service.add_story(auth.user_id, story_request(form)).await?;
    Ok(ApiResponse::created(story))
}

/// Update a story owned by the caller
///
/// PUT/PATCH /edit-book/:slug
pub async fn update_story(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    form: FormData<StoryFormRequest>,
) -> ApiResult<ApiResponse<StoryDetailResponse>> {
    let service = StoryService::new(state.service_context());
    let story = service
        .edit_story(auth.user_id, &slug, story_request(form))
        .await?;
    Ok(ApiResponse::ok(story))
}

/// Delete a story owned by the caller
///
/// DELETE /writers/book/:id/delete
pub async fn delete_story(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<DeleteStoryPath>,
) -> ApiResult<ApiResponse<StatusResponse>> {
    let story_id = path.id()?;
    let service = StoryService::new(state.service_context());
    let status = service.remove_story(auth.user_id, story_id).await?;
    Ok(ApiResponse::ok(status))
}

/// List the caller's stories
///
/// GET /user/books
pub async fn get_own_stories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiResponse<Vec<StoryOwnedResponse>>> {
    let service = StoryService::new(state.service_context());
    let stories = service.get_all_story(auth.user_id).await?;
    Ok(ApiResponse::ok(stories))
}

/// Get a story page
///
/// GET /book/:slug
pub async fn get_story(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<ApiResponse<StoryBySlugResponse>> {
    let service = StoryService::new(state.service_context());
    let story = service.get_story_by_slug(&slug).await?;
    Ok(ApiResponse::ok(story))
}

/// List stories ordered by `filter`
///
/// GET /book-list?filter=
pub async fn filter_stories(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<FilterQuery>,
) -> ApiResult<ApiResponse<Vec<StoryFilterResponse>>> {
    let service = StoryService::new(state.service_context());
    let stories = service.filter_story(query.value()).await?;
    Ok(ApiResponse::ok(stories))
}

/// List the stories of one category
///
/// GET /:category_slug?filter=
pub async fn filter_stories_by_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_slug): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<ApiResponse<Vec<StoryByCategoryResponse>>> {
    let service = StoryService::new(state.service_context());
    let stories = service
        .filter_story_by_category_slug(&category_slug, query.value())
        .await?;
    Ok(ApiResponse::ok(stories))
}

/// Raw cover image bytes
///
/// GET /book_front/:filename
pub async fn get_cover(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    let service = StoryService::new(state.service_context());
    let bytes = service.load_story_image_cover(&filename).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], bytes).into_response())
}

/// Guess an image content type from a filename extension
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
