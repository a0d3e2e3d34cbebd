//! Repositories used when no database is attached
//!
//! Reads behave as if the directory were empty; writes report
//! `DomainError::StorageUnavailable`.

use async_trait::async_trait;

use directory_core::entities::{
    FilterOptions, Member, MemberChanges, MemberFilter, NewMember, User, UserProfile,
};
use directory_core::error::DomainError;
use directory_core::traits::{MemberRepository, RepoResult, UserRepository};

/// Member repository without a backing store
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMemberRepository;

#[async_trait]
impl MemberRepository for UnavailableMemberRepository {
    async fn list(&self, _filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: i32) -> RepoResult<Option<Member>> {
        Ok(None)
    }

    async fn create(&self, _member: &NewMember) -> RepoResult<Member> {
        Err(DomainError::StorageUnavailable)
    }

    async fn update(&self, _id: i32, _changes: &MemberChanges) -> RepoResult<Option<Member>> {
        Err(DomainError::StorageUnavailable)
    }

    async fn delete(&self, _id: i32) -> RepoResult<bool> {
        Err(DomainError::StorageUnavailable)
    }

    async fn filter_options(&self) -> RepoResult<FilterOptions> {
        Ok(FilterOptions::default())
    }
}

/// User repository without a backing store
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableUserRepository;

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    async fn find_by_open_id(&self, _open_id: &str) -> RepoResult<Option<User>> {
        Ok(None)
    }

    async fn upsert(&self, _profile: &UserProfile) -> RepoResult<User> {
        Err(DomainError::StorageUnavailable)
    }
}
