//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(i32),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Roll number already registered: {0}")]
    RollNumberTaken(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage is not configured")]
    StorageUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::RollNumberTaken(_) => "ROLL_NUMBER_TAKEN",

            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this error originates from the storage layer
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable | Self::DatabaseError(_))
    }
}
