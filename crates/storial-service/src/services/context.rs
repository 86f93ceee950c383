//! Service context - dependency container for services
//!
//! Holds the pool, repositories, and other dependencies needed by services.

use std::sync::Arc;

use sqlx::PgConnection;
use storial_common::JwtService;
use storial_core::{
    AuthRepository, CategoryRepository, ChapterRepository, EntityId, IdGenerator,
    StoryRepository,
};
use storial_db::{
    PgAuthRepository, PgCategoryRepository, PgChapterRepository, PgPool, PgStoryRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::file::FileService;

/// Service context containing all dependencies
///
/// Repositories are stateless; each call receives the connection of the
/// transaction the calling service opened.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,

    // Repositories
    auth_repo: Arc<dyn AuthRepository<PgConnection>>,
    category_repo: Arc<dyn CategoryRepository<PgConnection>>,
    story_repo: Arc<dyn StoryRepository<PgConnection>>,
    chapter_repo: Arc<dyn ChapterRepository<PgConnection>>,

    // Services
    jwt_service: Arc<JwtService>,
    file_service: Arc<FileService>,
    id_generator: IdGenerator,
}

impl ServiceContext {
    /// Create a context backed by the PostgreSQL repositories
    pub fn new(pool: PgPool, jwt_service: Arc<JwtService>, file_service: Arc<FileService>) -> Self {
        Self {
            pool,
            auth_repo: Arc::new(PgAuthRepository::new()),
            category_repo: Arc::new(PgCategoryRepository::new()),
            story_repo: Arc::new(PgStoryRepository::new()),
            chapter_repo: Arc::new(PgChapterRepository::new()),
            jwt_service,
            file_service,
            id_generator: IdGenerator::new(),
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    pub fn auth_repo(&self) -> &dyn AuthRepository<PgConnection> {
        self.auth_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository<PgConnection> {
        self.category_repo.as_ref()
    }

    pub fn story_repo(&self) -> &dyn StoryRepository<PgConnection> {
        self.story_repo.as_ref()
    }

    pub fn chapter_repo(&self) -> &dyn ChapterRepository<PgConnection> {
        self.chapter_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the cover file service
    pub fn file_service(&self) -> &FileService {
        self.file_service.as_ref()
    }

    /// Generate a new entity id
    pub fn generate_id(&self) -> EntityId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("file_service", &self.file_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    auth_repo: Option<Arc<dyn AuthRepository<PgConnection>>>,
    category_repo: Option<Arc<dyn CategoryRepository<PgConnection>>>,
    story_repo: Option<Arc<dyn StoryRepository<PgConnection>>>,
    chapter_repo: Option<Arc<dyn ChapterRepository<PgConnection>>>,
    jwt_service: Option<Arc<JwtService>>,
    file_service: Option<Arc<FileService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn auth_repo(mut self, repo: Arc<dyn AuthRepository<PgConnection>>) -> Self {
        self.auth_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository<PgConnection>>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn story_repo(mut self, repo: Arc<dyn StoryRepository<PgConnection>>) -> Self {
        self.story_repo = Some(repo);
        self
    }

    pub fn chapter_repo(mut self, repo: Arc<dyn ChapterRepository<PgConnection>>) -> Self {
        self.chapter_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn file_service(mut self, service: Arc<FileService>) -> Self {
        self.file_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// Repositories left unset fall back to the PostgreSQL implementations.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if the pool or a service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let pool = self
            .pool
            .ok_or_else(|| ServiceError::internal("pool is required"))?;
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::internal("jwt_service is required"))?;
        let file_service = self
            .file_service
            .ok_or_else(|| ServiceError::internal("file_service is required"))?;

        let mut ctx = ServiceContext::new(pool, jwt_service, file_service);
        if let Some(repo) = self.auth_repo {
            ctx.auth_repo = repo;
        }
        if let Some(repo) = self.category_repo {
            ctx.category_repo = repo;
        }
        if let Some(repo) = self.story_repo {
            ctx.story_repo = repo;
        }
        if let Some(repo) = self.chapter_repo {
            ctx.chapter_repo = repo;
        }
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_pool() {
        let err = ServiceContextBuilder::new()
            .jwt_service(Arc::new(JwtService::new("secret", 1800)))
            .file_service(Arc::new(FileService::new("public/cover")))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("pool is required"));
    }
}
