//! PostgreSQL implementation of AuthRepository

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::instrument;

use storial_core::{AuthRepository, DomainError, EntityId, RepoResult, User};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

const USER_COLUMNS: &str = r"
    id, name, username, email, password, sex, bio, date_of_birth, phone_number,
    twitter, instagram, facebook, created_at, updated_at
";

/// PostgreSQL implementation of AuthRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PgAuthRepository;

impl PgAuthRepository {
    /// Create a new PgAuthRepository
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthRepository<PgConnection> for PgAuthRepository {
    #[instrument(skip(self, conn))]
    async fn email_exists(&self, conn: &mut PgConnection, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(r"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, conn))]
    async fn username_exists(&self, conn: &mut PgConnection, username: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(r"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, conn))]
    async fn find_by_email(&self, conn: &mut PgConnection, email: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, conn))]
    async fn find_by_id(&self, conn: &mut PgConnection, id: EntityId) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, conn, user), fields(user_id = %user.id))]
    async fn create(&self, conn: &mut PgConnection, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, username, email, password, sex, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.sex.code())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some("users_username_key") => DomainError::UsernameAlreadyExists,
                _ => DomainError::EmailAlreadyExists,
            })
        })?;

        Ok(())
    }
}
