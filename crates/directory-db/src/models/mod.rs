//! Database models - SQLx-compatible structs for PostgreSQL tables

mod member;
mod user;

pub use member::{FilterOptionRow, MemberModel};
pub use user::UserModel;
