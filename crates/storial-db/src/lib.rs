//! # storial-db
//!
//! Database layer implementing the storial-core repository traits with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations over a borrowed `PgConnection`
//! - The per-operation transaction boundary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storial_core::AuthRepository;
//! use storial_db::{begin, commit_or_rollback, PgAuthRepository};
//!
//! let mut tx = begin(&pool).await?;
//! let result = PgAuthRepository::new().email_exists(&mut *tx, "jane@example.com").await;
//! let taken = commit_or_rollback(tx, result).await?;
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod transaction;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAuthRepository, PgCategoryRepository, PgChapterRepository, PgStoryRepository,
};
pub use transaction::{begin, commit_or_rollback, PgTransaction};
