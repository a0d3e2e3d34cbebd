//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in directory-core,
//! plus the degraded implementations handed out when no database is attached.

mod error;
mod member;
mod unavailable;
mod user;

pub use member::PgMemberRepository;
pub use unavailable::{UnavailableMemberRepository, UnavailableUserRepository};
pub use user::PgUserRepository;
