//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase field names.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Member Responses
// ============================================================================

/// Member as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub year_of_admission: i32,
    pub degree_program: String,
    pub roll_number: String,
    pub department: Option<String>,
    pub city: String,
    pub permanent_address: Option<String>,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Distinct values for the directory search menus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptionsResponse {
    pub years: Vec<i32>,
    pub degrees: Vec<String>,
    pub cities: Vec<String>,
}

/// Acknowledgement for mutations without a body
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ============================================================================
// Session Responses
// ============================================================================

/// Signed-in user as returned by `auth.me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

/// Result of a completed sign-in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    /// Storage that is unconfigured reports `unavailable`, which is still ready:
    /// the directory serves empty reads in that mode.
    pub fn ready(database_configured: bool, database_healthy: bool) -> Self {
        let database = match (database_configured, database_healthy) {
            (false, _) => "unavailable",
            (true, true) => "healthy",
            (true, false) => "unhealthy",
        };
        Self {
            status: if database == "unhealthy" { "not_ready" } else { "ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: database.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
