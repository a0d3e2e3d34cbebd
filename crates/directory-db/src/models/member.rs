//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
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

/// Projection used to collect filter options
#[derive(Debug, Clone, FromRow)]
pub struct FilterOptionRow {
    pub year_of_admission: i32,
    pub degree_program: String,
    pub city: String,
}
