//! Storage handle
//!
//! The directory keeps serving when the database is missing or unreachable:
//! reads come back empty and writes fail. [`Storage`] captures which of the
//! two situations the process is in and hands out matching repositories.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use directory_core::error::DomainError;
use directory_core::traits::{MemberRepository, RepoResult, UserRepository};

use super::postgres::{create_pool, DatabaseConfig};
use crate::repositories::{
    PgMemberRepository, PgUserRepository, UnavailableMemberRepository,
    UnavailableUserRepository,
};
use crate::schema::run_migrations;

/// Injected storage handle
#[derive(Debug, Clone)]
pub enum Storage {
    /// Connected PostgreSQL pool
    Postgres(PgPool),
    /// No database configured, or the initial connection failed
    Unavailable,
}

impl Storage {
    /// Connect to the configured database, degrading instead of failing
    ///
    /// A schema failure also degrades: serving queries against a half-created
    /// schema would only produce confusing errors later.
    pub async fn connect(config: Option<&DatabaseConfig>) -> Self {
        let Some(config) = config else {
            warn!("DATABASE_URL is not set; member storage is unavailable");
            return Self::Unavailable;
        };

        let pool = match create_pool(config).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "Failed to connect to database; member storage is unavailable");
                return Self::Unavailable;
            }
        };

        if config.run_migrations {
            if let Err(e) = run_migrations(&pool).await {
                warn!(error = %e, "Failed to apply schema; member storage is unavailable");
                return Self::Unavailable;
            }
        }

        info!("Database connection established");
        Self::Postgres(pool)
    }

    /// Whether a database is attached
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Postgres(_))
    }

    /// Member repository backed by this handle
    pub fn member_repository(&self) -> Arc<dyn MemberRepository> {
        match self {
            Self::Postgres(pool) => Arc::new(PgMemberRepository::new(pool.clone())),
            Self::Unavailable => Arc::new(UnavailableMemberRepository),
        }
    }

    /// User repository backed by this handle
    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        match self {
            Self::Postgres(pool) => Arc::new(PgUserRepository::new(pool.clone())),
            Self::Unavailable => Arc::new(UnavailableUserRepository),
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> RepoResult<()> {
        match self {
            Self::Postgres(pool) => sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .map(|_| ())
                .map_err(|e| DomainError::DatabaseError(e.to_string())),
            Self::Unavailable => Err(DomainError::StorageUnavailable),
        }
    }
}
