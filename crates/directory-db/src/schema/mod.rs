//! Embedded schema
//!
//! Every script is idempotent, so applying the full list on each startup is safe.

use sqlx::PgPool;
use tracing::{debug, info};

/// Ordered schema scripts, applied front to back
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_create_members",
        include_str!("../../migrations/0001_create_members.sql"),
    ),
    (
        "0002_create_users",
        include_str!("../../migrations/0002_create_users.sql"),
    ),
];

/// Apply every embedded schema script
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (name, sql) in MIGRATIONS {
        debug!(migration = %name, "Applying schema script");
        sqlx::raw_sql(sql).execute(pool).await?;
    }
    info!(count = MIGRATIONS.len(), "Schema is up to date");
    Ok(())
}
