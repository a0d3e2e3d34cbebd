//! Repository traits

mod repositories;

pub use repositories::{MemberRepository, RepoResult, UserRepository};
