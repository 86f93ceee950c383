//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::instrument;

use storial_core::{Category, CategoryRepository, EntityId, RepoResult};

use crate::models::CategoryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CategoryRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PgCategoryRepository;

impl PgCategoryRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CategoryRepository<PgConnection> for PgCategoryRepository {
    #[instrument(skip(self, conn))]
    async fn find_all(&self, conn: &mut PgConnection) -> RepoResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryModel>(
            r"SELECT id, name, slug FROM categories ORDER BY name ASC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self, conn))]
    async fn find_by_id(
        &self,
        conn: &mut PgConnection,
        id: EntityId,
    ) -> RepoResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryModel>(
            r"SELECT id, name, slug FROM categories WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Category::from))
    }
}
