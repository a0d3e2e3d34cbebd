//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use directory_core::entities::{FilterOptions, Member, User};

use super::responses::{FilterOptionsResponse, MemberResponse, UserResponse};

// ============================================================================
// Member Mappers
// ============================================================================

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            phone: member.phone,
            year_of_admission: member.year_of_admission,
            degree_program: member.degree_program,
            roll_number: member.roll_number,
            department: member.department,
            city: member.city,
            permanent_address: member.permanent_address,
            photo_url: member.photo_url,
            bio: member.bio,
            social_links: member.social_links,
            is_verified: member.is_verified,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<FilterOptions> for FilterOptionsResponse {
    fn from(options: FilterOptions) -> Self {
        Self {
            years: options.years,
            degrees: options.degrees,
            cities: options.cities,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            open_id: user.open_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            login_method: user.login_method.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_signed_in: user.last_signed_in,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
