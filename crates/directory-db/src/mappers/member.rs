//! Member model -> entity mapper

use directory_core::entities::Member;

use crate::models::{FilterOptionRow, MemberModel};

/// Convert MemberModel to Member entity
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            year_of_admission: model.year_of_admission,
            degree_program: model.degree_program,
            roll_number: model.roll_number,
            department: model.department,
            city: model.city,
            permanent_address: model.permanent_address,
            photo_url: model.photo_url,
            bio: model.bio,
            social_links: model.social_links,
            is_verified: model.is_verified,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<FilterOptionRow> for (i32, String, String) {
    fn from(row: FilterOptionRow) -> Self {
        (row.year_of_admission, row.degree_program, row.city)
    }
}
