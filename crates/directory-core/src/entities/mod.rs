//! Domain entities - core business objects

mod filter;
mod member;
mod user;

pub use filter::{FilterOptions, MemberFilter};
pub use member::{
    is_valid_year_of_admission, max_year_of_admission, normalize_optional_text, Member,
    MemberChanges, NewMember, MIN_YEAR_OF_ADMISSION,
};
pub use user::{Role, User, UserProfile};
