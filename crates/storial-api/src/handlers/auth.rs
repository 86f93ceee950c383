//! Authentication handlers
//!
//! Endpoints for user registration and login.

use axum::extract::State;
use storial_service::{
    dto::{AuthUserResponse, LoginRequest, RegisterRequest},
    AuthService,
};

use crate::extractors::FormData;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Register a new user
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    form: FormData<RegisterRequest>,
) -> ApiResult<ApiResponse<AuthUserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(form.fields).await?;
    Ok(ApiResponse::created(response))
}

/// Login with email and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    form: FormData<LoginRequest>,
) -> ApiResult<ApiResponse<AuthUserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(form.fields).await?;
    Ok(ApiResponse::ok(response))
}
