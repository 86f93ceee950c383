//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! storial-core. Repositories hold no state; every call runs on the
//! connection of the caller's transaction.

mod auth;
mod category;
mod chapter;
mod error;
mod story;

pub use auth::PgAuthRepository;
pub use category::PgCategoryRepository;
pub use chapter::PgChapterRepository;
pub use error::{map_db_error, map_foreign_key_violation, map_unique_violation};
pub use story::PgStoryRepository;
