//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
///
/// Display strings are the messages shown to API clients for every
/// non-infrastructure variant.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("email not found")]
    EmailNotFound,

    #[error("story not found")]
    StoryNotFound,

    #[error("chapter not found")]
    ChapterNotFound,

    #[error("category not found")]
    CategoryNotFound,

    #[error("cover image not found")]
    CoverImageNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    // =========================================================================
    // Credential Errors
    // =========================================================================
    #[error("password are wrong")]
    PasswordWrong,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("you do not own this chapter")]
    NotChapterOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("cannot like your own chapter")]
    CannotLikeOwnChapter,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::EmailNotFound => "EMAIL_NOT_FOUND",
            Self::StoryNotFound => "STORY_NOT_FOUND",
            Self::ChapterNotFound => "CHAPTER_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::CoverImageNotFound => "COVER_IMAGE_NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Credentials
            Self::PasswordWrong => "PASSWORD_WRONG",

            // Authorization
            Self::NotChapterOwner => "NOT_CHAPTER_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::CannotLikeOwnChapter => "CANNOT_LIKE_OWN_CHAPTER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EmailNotFound
                | Self::StoryNotFound
                | Self::ChapterNotFound
                | Self::CategoryNotFound
                | Self::CoverImageNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a credential failure
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::PasswordWrong)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotChapterOwner)
    }

    /// Check if this is a conflict error
    ///
    /// Conflicts are reported as 400 Bad Request by the API.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::UsernameAlreadyExists | Self::CannotLikeOwnChapter
        )
    }

    /// Check if this wraps an infrastructure failure
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::StorageError(_) | Self::InternalError(_)
        )
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_unauthenticated() {
            401
        } else if self.is_authorization() {
            403
        } else if self.is_validation() || self.is_conflict() {
            400
        } else {
            500
        }
    }
}
