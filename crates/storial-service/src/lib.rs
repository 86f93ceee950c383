//! # storial-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every service operation runs inside exactly one database transaction that
//! is opened with [`storial_db::begin`] and finished with
//! [`storial_db::commit_or_rollback`].

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CategoryService, ChapterService, FieldErrors, FileService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StoryService,
};
