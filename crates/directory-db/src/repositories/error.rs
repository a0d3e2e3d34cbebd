//! Error handling utilities for repositories

use directory_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map constraint failures on writes, falling back to a database error
///
/// Unique violations become `on_unique()`; check violations are reported as
/// validation errors since they mean the input was out of range.
pub fn map_write_error<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_check_violation() {
            return DomainError::ValidationError(db_err.message().to_string());
        }
    }
    DomainError::DatabaseError(e.to_string())
}
