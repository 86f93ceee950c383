//! Authentication service
//!
//! Handles user registration and login.

use sqlx::PgConnection;
use storial_common::{hash_password, verify_password};
use storial_core::{DomainError, User};
use storial_db::{begin, commit_or_rollback};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AuthUserResponse, LoginRequest, RegisterRequest, UserWithToken};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// Email uniqueness is checked before username uniqueness.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthUserResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.register_in(&mut tx, request).await;
        commit_or_rollback(tx, result).await
    }

    async fn register_in(
        &self,
        conn: &mut PgConnection,
        request: RegisterRequest,
    ) -> ServiceResult<AuthUserResponse> {
        request.validate()?;
        let sex = request.gender()?;

        let repo = self.ctx.auth_repo();
        if repo.email_exists(&mut *conn, &request.email).await? {
            warn!("Registration rejected: email taken");
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if repo.username_exists(&mut *conn, &request.username).await? {
            warn!("Registration rejected: username taken");
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(
            self.ctx.generate_id(),
            request.name,
            request.username,
            request.email,
            password_hash,
            sex,
        );
        repo.create(&mut *conn, &user).await?;

        let token = self.ctx.jwt_service().issue_token(&user)?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(UserWithToken { user: &user, token }.into())
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthUserResponse> {
        let mut tx = begin(self.ctx.pool()).await?;
        let result = self.login_in(&mut tx, request).await;
        commit_or_rollback(tx, result).await
    }

    async fn login_in(
        &self,
        conn: &mut PgConnection,
        request: LoginRequest,
    ) -> ServiceResult<AuthUserResponse> {
        request.validate()?;

        let user = self
            .ctx
            .auth_repo()
            .find_by_email(&mut *conn, &request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: email not found");
                DomainError::EmailNotFound
            })?;

        if !verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(DomainError::PasswordWrong.into());
        }

        let token = self.ctx.jwt_service().issue_token(&user)?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(UserWithToken { user: &user, token }.into())
    }
}
