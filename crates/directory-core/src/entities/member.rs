//! Member entity - one directory record for a community participant

use chrono::{DateTime, Datelike, Utc};

/// Earliest admission year accepted for a member
pub const MIN_YEAR_OF_ADMISSION: i32 = 1900;

/// Latest admission year accepted for a member (the current calendar year)
pub fn max_year_of_admission() -> i32 {
    Utc::now().year()
}

/// Check that an admission year lies within `[1900, current year]`
#[inline]
pub fn is_valid_year_of_admission(year: i32) -> bool {
    (MIN_YEAR_OF_ADMISSION..=max_year_of_admission()).contains(&year)
}

/// Trim optional text and collapse blank values to `None`.
///
/// Optional member fields are never stored as empty strings.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Member entity as persisted in the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
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

impl Member {
    /// Case-insensitive infix match on the member's city
    pub fn city_contains(&self, needle: &str) -> bool {
        contains_ignore_case(&self.city, needle)
    }

    /// Case-insensitive infix match on the member's name
    pub fn name_contains(&self, needle: &str) -> bool {
        contains_ignore_case(&self.name, needle)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Data for a member that has not been stored yet.
///
/// Storage assigns `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
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
}

impl NewMember {
    /// Trim required text and collapse blank optional text to `None`
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_optional_text(self.email),
            phone: normalize_optional_text(self.phone),
            year_of_admission: self.year_of_admission,
            degree_program: self.degree_program.trim().to_string(),
            roll_number: self.roll_number.trim().to_string(),
            department: normalize_optional_text(self.department),
            city: self.city.trim().to_string(),
            permanent_address: normalize_optional_text(self.permanent_address),
            photo_url: normalize_optional_text(self.photo_url),
            bio: normalize_optional_text(self.bio),
            social_links: normalize_optional_text(self.social_links),
            is_verified: self.is_verified,
        }
    }

    /// Materialize a stored member from this data and the generated fields
    pub fn into_member(self, id: i32, now: DateTime<Utc>) -> Member {
        Member {
            id,
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
            is_verified: self.is_verified,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a member.
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChanges {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub year_of_admission: Option<i32>,
    pub degree_program: Option<String>,
    pub roll_number: Option<String>,
    pub department: Option<Option<String>>,
    pub city: Option<String>,
    pub permanent_address: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub social_links: Option<Option<String>>,
}

impl MemberChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Trim required text and collapse blank optional text to `Some(None)`
    #[must_use]
    pub fn normalized(self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        let nullable = |v: Option<Option<String>>| v.map(normalize_optional_text);

        Self {
            name: trim(self.name),
            email: nullable(self.email),
            phone: nullable(self.phone),
            year_of_admission: self.year_of_admission,
            degree_program: trim(self.degree_program),
            roll_number: trim(self.roll_number),
            department: nullable(self.department),
            city: trim(self.city),
            permanent_address: nullable(self.permanent_address),
            photo_url: nullable(self.photo_url),
            bio: nullable(self.bio),
            social_links: nullable(self.social_links),
        }
    }

    /// Apply the supplied fields to `member` and bump `updated_at`
    pub fn apply_to(self, member: &mut Member, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(email) = self.email {
            member.email = email;
        }
        if let Some(phone) = self.phone {
            member.phone = phone;
        }
        if let Some(year) = self.year_of_admission {
            member.year_of_admission = year;
        }
        if let Some(degree_program) = self.degree_program {
            member.degree_program = degree_program;
        }
        if let Some(roll_number) = self.roll_number {
            member.roll_number = roll_number;
        }
        if let Some(department) = self.department {
            member.department = department;
        }
        if let Some(city) = self.city {
            member.city = city;
        }
        if let Some(permanent_address) = self.permanent_address {
            member.permanent_address = permanent_address;
        }
        if let Some(photo_url) = self.photo_url {
            member.photo_url = photo_url;
        }
        if let Some(bio) = self.bio {
            member.bio = bio;
        }
        if let Some(social_links) = self.social_links {
            member.social_links = social_links;
        }
        member.updated_at = now;
    }
}
