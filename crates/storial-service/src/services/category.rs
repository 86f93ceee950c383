//! Category service

use sqlx::PgConnection;
use storial_db::{begin, commit_or_rollback};
use tracing::{debug, instrument};

use crate::dto::{CategoryResponse, CategoryWithCount};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All categories ordered by name, each with its live story count
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.get_all_in(&mut tx).await;
        commit_or_rollback(tx, result).await
    }

    async fn get_all_in(&self, conn: &mut PgConnection) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().find_all(&mut *conn).await?;

        let mut responses = Vec::with_capacity(categories.len());
        for category in &categories {
            let story_counts = self
                .ctx
                .story_repo()
                .count_by_category_id(&mut *conn, category.id)
                .await?;
            responses.push(
                CategoryWithCount {
                    category,
                    story_counts,
                }
                .into(),
            );
        }

        debug!(count = responses.len(), "Categories loaded");
        Ok(responses)
    }
}
