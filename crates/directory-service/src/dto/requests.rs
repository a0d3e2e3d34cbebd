//! Request DTOs for member procedures
//!
//! All payload DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire.

use directory_core::entities::{MemberChanges, MemberFilter, NewMember};
use directory_core::{max_year_of_admission, MIN_YEAR_OF_ADMISSION};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidateEmail, ValidationError};

// ============================================================================
// Field validators
// ============================================================================

/// Required text must contain something other than whitespace
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Admission year must lie in `[1900, current year]`
fn validate_year_of_admission(year: i32) -> Result<(), ValidationError> {
    let max = max_year_of_admission();
    if (MIN_YEAR_OF_ADMISSION..=max).contains(&year) {
        return Ok(());
    }
    let mut err = ValidationError::new("range");
    err.message = Some(
        format!("Year of admission must be between {MIN_YEAR_OF_ADMISSION} and {max}").into(),
    );
    Err(err)
}

/// Optional email: blank means absent, anything else must be an address
fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email"))
}

/// Distinguish an omitted field (`None`) from an explicit `null` (`Some(None)`)
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ============================================================================
// Member Requests
// ============================================================================

/// Optional predicates for `members.list`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersQuery {
    pub year_of_admission: Option<i32>,
    pub degree_program: Option<String>,
    pub city: Option<String>,
    pub search_term: Option<String>,
}

impl From<ListMembersQuery> for MemberFilter {
    fn from(query: ListMembersQuery) -> Self {
        MemberFilter {
            year_of_admission: query.year_of_admission,
            degree_program: query.degree_program,
            city: query.city,
            search_term: query.search_term,
        }
        .normalized()
    }
}

/// Payload for `members.create`: every member field except generated ones
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "validate_not_blank", message = "Name is required")
    )]
    pub name: String,

    #[validate(
        length(max = 320, message = "Email must be at most 320 characters"),
        custom(function = "validate_optional_email", message = "Invalid email format")
    )]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(custom(function = "validate_year_of_admission"))]
    pub year_of_admission: i32,

    #[validate(
        length(max = 100, message = "Degree program must be at most 100 characters"),
        custom(function = "validate_not_blank", message = "Degree program is required")
    )]
    pub degree_program: String,

    #[validate(
        length(max = 50, message = "Roll number must be at most 50 characters"),
        custom(function = "validate_not_blank", message = "Roll number is required")
    )]
    pub roll_number: String,

    #[validate(length(max = 255, message = "Department must be at most 255 characters"))]
    pub department: Option<String>,

    #[validate(
        length(max = 100, message = "City must be at most 100 characters"),
        custom(function = "validate_not_blank", message = "City is required")
    )]
    pub city: String,

    pub permanent_address: Option<String>,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<String>,
}

impl CreateMemberRequest {
    /// Convert into a normalised insert; admin-created members start verified
    pub fn into_new_member(self) -> NewMember {
        NewMember {
            name: self.name,
            email: self.email,
            phone: self.phone,
            year_of_admission: self.year_of_admission,
            degree_program: self.degree_program,
            roll_number: self.roll_number,
            department: self.department,
            city: self.city,
            permanent_address: self.permanent_address,
            photo_url: self.photo_url,
            bio: self.bio,
            social_links: self.social_links,
            is_verified: true,
        }
        .normalized()
    }
}

/// Partial member fields for `members.update`.
///
/// Nullable fields accept an explicit `null` to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberChangesRequest {
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "validate_not_blank", message = "Name is required")
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(
        length(max = 320, message = "Email must be at most 320 characters"),
        custom(function = "validate_optional_email", message = "Invalid email format")
    )]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<Option<String>>,

    #[validate(custom(function = "validate_year_of_admission"))]
    pub year_of_admission: Option<i32>,

    #[validate(
        length(max = 100, message = "Degree program must be at most 100 characters"),
        custom(function = "validate_not_blank", message = "Degree program is required")
    )]
    pub degree_program: Option<String>,

    #[validate(
        length(max = 50, message = "Roll number must be at most 50 characters"),
        custom(function = "validate_not_blank", message = "Roll number is required")
    )]
    pub roll_number: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 255, message = "Department must be at most 255 characters"))]
    pub department: Option<Option<String>>,

    #[validate(
        length(max = 100, message = "City must be at most 100 characters"),
        custom(function = "validate_not_blank", message = "City is required")
    )]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub permanent_address: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub photo_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub bio: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub social_links: Option<Option<String>>,
}

impl MemberChangesRequest {
    /// Convert into normalised domain changes
    pub fn into_changes(self) -> MemberChanges {
        MemberChanges {
            name: self.name,
            email: self.email,
            phone: self.phone,
            year_of_admission: self.year_of_admission,
            degree_program: self.degree_program,
            roll_number: self.roll_number,
            department: self.department,
            city: self.city,
            permanent_address: self.permanent_address,
            photo_url: self.photo_url,
            bio: self.bio,
            social_links: self.social_links,
        }
        .normalized()
    }
}

/// Payload for `members.update`; the id travels in the path
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(nested)]
    pub data: MemberChangesRequest,
}
