//! Category handlers

use axum::extract::State;
use storial_service::{dto::CategoryResponse, CategoryService};

use crate::extractors::AuthUser;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// List categories with their story counts
///
/// GET /books/categories
pub async fn get_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<ApiResponse<Vec<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let categories = service.get_all().await?;
    Ok(ApiResponse::ok(categories))
}
