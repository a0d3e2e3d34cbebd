//! # directory-core
//!
//! Domain layer containing the member entity, directory filters, caller identities,
//! and repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    is_valid_year_of_admission, max_year_of_admission, normalize_optional_text, FilterOptions,
    Member, MemberChanges, MemberFilter, NewMember, Role, User, UserProfile,
    MIN_YEAR_OF_ADMISSION,
};
pub use error::DomainError;
pub use traits::{MemberRepository, RepoResult, UserRepository};
