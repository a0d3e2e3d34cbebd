//! # directory-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `directory-core`. It handles:
//!
//! - Connection pool management and the [`Storage`] handle
//! - The embedded schema (`migrations/*.sql`)
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations, including a degraded variant used when no
//!   database is reachable
//!
//! ## Usage
//!
//! ```rust,ignore
//! use directory_db::{DatabaseConfig, Storage};
//!
//! async fn example(config: DatabaseConfig) {
//!     let storage = Storage::connect(Some(&config)).await;
//!     let members = storage.member_repository();
//!     // Use the repository...
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool, Storage};
pub use repositories::{
    PgMemberRepository, PgUserRepository, UnavailableMemberRepository,
    UnavailableUserRepository,
};
pub use schema::run_migrations;
