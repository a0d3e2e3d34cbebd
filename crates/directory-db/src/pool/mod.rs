//! Database connection pool management

mod postgres;
mod storage;

pub use postgres::{create_pool, DatabaseConfig};
pub use storage::Storage;

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
