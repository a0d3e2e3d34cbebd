//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use directory_core::entities::{User, UserProfile};
use directory_core::error::DomainError;
use directory_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_open_id(&self, open_id: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, open_id, name, email, login_method, role,
                   created_at, updated_at, last_signed_in
            FROM users
            WHERE open_id = $1
            ",
        )
        .bind(open_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    /// Fields left as `None` keep their stored value; a new row starts as `user`
    /// unless a role is supplied.
    #[instrument(skip(self, profile), fields(open_id = %profile.open_id))]
    async fn upsert(&self, profile: &UserProfile) -> RepoResult<User> {
        if profile.open_id.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "User openId is required for upsert".to_string(),
            ));
        }

        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (open_id, name, email, login_method, role, last_signed_in)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'user'), NOW())
            ON CONFLICT (open_id) DO UPDATE
            SET name = COALESCE(EXCLUDED.name, users.name),
                email = COALESCE(EXCLUDED.email, users.email),
                login_method = COALESCE(EXCLUDED.login_method, users.login_method),
                role = COALESCE($5, users.role),
                last_signed_in = NOW(),
                updated_at = NOW()
            RETURNING id, open_id, name, email, login_method, role,
                      created_at, updated_at, last_signed_in
            ",
        )
        .bind(&profile.open_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.login_method)
        .bind(profile.role.map(|r| r.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(User::from(model))
    }
}
