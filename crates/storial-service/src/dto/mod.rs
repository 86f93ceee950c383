//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for form inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CoverUpload, CreateChapterRequest, CreateStoryRequest, LoginRequest, RegisterRequest,
    StoryFormRequest, UpdateChapterRequest, UpdateStoryRequest,
};

pub use responses::{
    AuthUserResponse, AuthorResponse, CategoryResponse, CategorySummaryResponse,
    ChapterDetailResponse, ChapterReadResponse, ChapterStoryResponse, ChapterSummaryResponse,
    OwnerResponse, StatusResponse, StoryByCategoryResponse, StoryBySlugResponse,
    StoryDetailResponse, StoryFilterResponse, StoryOwnedResponse,
};

pub use mappers::{
    CategoryWithCount, ChapterWithLikes, StoryWithCategoryCount, StoryWithChapterTotals,
    StoryWithCount, UserWithToken,
};
