//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    FilterOptions, Member, MemberChanges, MemberFilter, NewMember, User, UserProfile,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// List members matching every supplied predicate, newest first
    async fn list(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>>;

    /// Find member by ID
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Member>>;

    /// Insert a member and return the stored row.
    ///
    /// Fails with `DomainError::RollNumberTaken` on a duplicate roll number.
    async fn create(&self, member: &NewMember) -> RepoResult<Member>;

    /// Apply a partial update and return the stored row, `None` if no row matched
    async fn update(&self, id: i32, changes: &MemberChanges) -> RepoResult<Option<Member>>;

    /// Hard delete a member; returns whether a row was removed
    async fn delete(&self, id: i32) -> RepoResult<bool>;

    /// Distinct years, degree programs and cities across all members
    async fn filter_options(&self) -> RepoResult<FilterOptions>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by external identity
    async fn find_by_open_id(&self, open_id: &str) -> RepoResult<Option<User>>;

    /// Insert or refresh a user by external identity and return the stored row
    async fn upsert(&self, profile: &UserProfile) -> RepoResult<User>;
}
