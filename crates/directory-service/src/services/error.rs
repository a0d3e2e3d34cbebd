//! Service layer error types
//!
//! Every procedure failure is one of four kinds: validation, forbidden,
//! not found, or internal. Storage detail never reaches the message.

use directory_common::AppError;
use directory_core::DomainError;
use std::fmt;
use tracing::error;
use validator::ValidationErrors;

/// Caller-visible failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Forbidden,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Rejected input, including a duplicate roll number
    Validation { code: &'static str, message: String },

    /// Field-level validation failures
    InvalidInput(ValidationErrors),

    /// Caller lacks the role required by the procedure
    Forbidden(String),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Unclassified failure; the message is safe to show to callers
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message, .. } => write!(f, "{message}"),
            Self::InvalidInput(_) => write!(f, "Invalid input"),
            Self::Forbidden(msg) => write!(f, "{msg}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            code: "VALIDATION_ERROR",
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Get the error code for API responses; more specific than the kind
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. } => *code,
            Self::NotFound { resource: "Member", .. } => "UNKNOWN_MEMBER",
            _ => self.kind().as_str(),
        }
    }

    /// Field errors, when the failure came from payload validation
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::InvalidInput(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidInput(errors)
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MemberNotFound(id) => Self::not_found("Member", id.to_string()),
            DomainError::RollNumberTaken(roll_number) => Self::Validation {
                code: "ROLL_NUMBER_TAKEN",
                message: format!("Roll number already exists: {roll_number}"),
            },
            DomainError::ValidationError(msg) => Self::validation(msg),
            other => {
                error!(error = %other, code = other.code(), "Unclassified domain error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::from(e),
            other => {
                error!(error = %other, code = other.error_code(), "Infrastructure error");
                Self::internal("Internal server error")
            }
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
