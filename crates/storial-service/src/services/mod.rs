//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and opens one
//! transaction per operation.

pub mod auth;
pub mod category;
pub mod chapter;
pub mod context;
pub mod error;
pub mod file;
pub mod story;

pub use auth::AuthService;
pub use category::CategoryService;
pub use chapter::ChapterService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{FieldErrors, ServiceError, ServiceResult};
pub use file::FileService;
pub use story::StoryService;
