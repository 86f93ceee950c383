//! Request DTOs for API endpoints
//!
//! Request bodies arrive as form payloads, so every field is a string and is
//! parsed into its domain type only after validation. Missing fields
//! deserialize to empty strings and are reported by the length rules.

use serde::Deserialize;
use storial_core::{EntityId, Gender};
use validator::{Validate, ValidationError};

use crate::services::{ServiceError, ServiceResult};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "Name must be 5-255 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "Username must be 5-255 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(
        length(min = 5, max = 255, message = "Email must be 5-255 characters"),
        email(message = "Invalid email format")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "Password must be 5-255 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(custom(function = "validate_sex"))]
    pub sex: String,
}

impl RegisterRequest {
    /// Parsed sex code; only meaningful after validation
    pub fn gender(&self) -> ServiceResult<Gender> {
        Gender::parse(&self.sex).ok_or_else(|| ServiceError::invalid_field("sex", SEX_MESSAGE))
    }
}

/// User login request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 5, max = 255, message = "Email must be 5-255 characters"),
        email(message = "Invalid email format")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "Password must be 5-255 characters"))]
    pub password: String,
}

// ============================================================================
// Story Requests
// ============================================================================

/// Cover image attached to a story form
#[derive(Clone, Default)]
pub struct CoverUpload {
    /// Client-side filename; only its extension is kept
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for CoverUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverUpload")
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Create or update story request
///
/// The same form is used by both operations; the cover is optional on each.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StoryFormRequest {
    #[serde(default, rename = "categoryId")]
    #[validate(custom(function = "validate_id"))]
    pub category_id: String,

    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "Title must be 5-255 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: String,

    #[serde(default, rename = "isAdult")]
    #[validate(custom(function = "validate_flag"))]
    pub is_adult: String,

    #[serde(default, rename = "isPublished")]
    #[validate(custom(function = "validate_flag"))]
    pub is_published: String,

    #[serde(skip)]
    pub cover: Option<CoverUpload>,
}

impl StoryFormRequest {
    pub fn category_id(&self) -> ServiceResult<EntityId> {
        parse_id("categoryId", &self.category_id)
    }

    pub fn is_adult(&self) -> ServiceResult<bool> {
        parse_flag("isAdult", &self.is_adult)
    }

    pub fn is_published(&self) -> ServiceResult<bool> {
        parse_flag("isPublished", &self.is_published)
    }
}

pub type CreateStoryRequest = StoryFormRequest;
pub type UpdateStoryRequest = StoryFormRequest;

// ============================================================================
// Chapter Requests
// ============================================================================

/// Create chapter request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateChapterRequest {
    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "Title must be 5-255 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 5, message = "Body must be at least 5 characters"))]
    pub body: String,

    #[serde(default, rename = "authorComment")]
    #[validate(length(max = 255, message = "Author comment must be at most 255 characters"))]
    pub author_comment: String,

    #[serde(default, rename = "isPublished")]
    #[validate(custom(function = "validate_flag"))]
    pub is_published: String,
}

impl CreateChapterRequest {
    pub fn is_published(&self) -> ServiceResult<bool> {
        parse_flag("isPublished", &self.is_published)
    }
}

/// Update chapter request; an absent `isPublished` keeps the current value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChapterRequest {
    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "Title must be 5-255 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 5, message = "Body must be at least 5 characters"))]
    pub body: String,

    #[serde(default, rename = "authorComment")]
    #[validate(length(max = 255, message = "Author comment must be at most 255 characters"))]
    pub author_comment: String,

    #[serde(default, rename = "isPublished")]
    #[validate(custom(function = "validate_flag"))]
    pub is_published: Option<String>,
}

impl UpdateChapterRequest {
    pub fn is_published(&self) -> ServiceResult<Option<bool>> {
        self.is_published
            .as_deref()
            .map(|value| parse_flag("isPublished", value))
            .transpose()
    }
}

// ============================================================================
// Field rules
// ============================================================================

const SEX_MESSAGE: &str = "Sex must be one of 0, 1, 2, 9";
const FLAG_MESSAGE: &str = "Must be 0 or 1";
const ID_MESSAGE: &str = "Must be a valid id";

fn validate_sex(value: &str) -> Result<(), ValidationError> {
    if Gender::parse(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("sex").with_message(SEX_MESSAGE.into()))
    }
}

fn validate_flag(value: &str) -> Result<(), ValidationError> {
    if flag_value(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("flag").with_message(FLAG_MESSAGE.into()))
    }
}

fn validate_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Required".into()));
    }
    EntityId::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("id").with_message(ID_MESSAGE.into()))
}

fn flag_value(value: &str) -> Option<bool> {
    match value.trim() {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

fn parse_flag(field: &str, value: &str) -> ServiceResult<bool> {
    flag_value(value).ok_or_else(|| ServiceError::invalid_field(field, FLAG_MESSAGE))
}

fn parse_id(field: &str, value: &str) -> ServiceResult<EntityId> {
    EntityId::parse(value).map_err(|_| ServiceError::invalid_field(field, ID_MESSAGE))
}
