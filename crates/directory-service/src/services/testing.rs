//! In-memory repositories and fixtures for service tests

use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use directory_common::auth::JwtService;
use directory_core::entities::{
    FilterOptions, Member, MemberChanges, MemberFilter, NewMember, Role, User, UserProfile,
};
use directory_core::error::DomainError;
use directory_core::traits::{MemberRepository, RepoResult, UserRepository};
use directory_db::Storage;

use crate::dto::CreateMemberRequest;

use super::context::ServiceContext;
use super::policy::Caller;

pub const TEST_SECRET: &str = "service-test-secret";

/// Member store with the same observable behaviour as the PostgreSQL one
#[derive(Default)]
pub struct InMemoryMembers {
    members: Mutex<Vec<Member>>,
    next_id: AtomicI32,
    mutations: AtomicUsize,
}

impl InMemoryMembers {
    pub fn len(&self) -> usize {
        self.members.lock().unwrap().len()
    }

    /// Number of create/update/delete calls that reached the store
    pub fn calls(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn roll_number_taken(members: &[Member], roll_number: &str, except: Option<i32>) -> bool {
        members
            .iter()
            .any(|m| m.roll_number == roll_number && Some(m.id) != except)
    }
}

#[async_trait]
impl MemberRepository for InMemoryMembers {
    async fn list(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        let filter = filter.clone().normalized();
        let mut found: Vec<Member> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut members = self.members.lock().unwrap();
        if Self::roll_number_taken(&members, &member.roll_number, None) {
            return Err(DomainError::RollNumberTaken(member.roll_number.clone()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = member.clone().into_member(id, Utc::now());
        members.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, changes: &MemberChanges) -> RepoResult<Option<Member>> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut members = self.members.lock().unwrap();
        if let Some(roll_number) = &changes.roll_number {
            if Self::roll_number_taken(&members, roll_number, Some(id)) {
                return Err(DomainError::RollNumberTaken(roll_number.clone()));
            }
        }
        let Some(member) = members.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        let now = Utc::now().max(member.updated_at + Duration::microseconds(1));
        changes.clone().apply_to(member, now);
        Ok(Some(member.clone()))
    }

    async fn delete(&self, id: i32) -> RepoResult<bool> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.id != id);
        Ok(members.len() < before)
    }

    async fn filter_options(&self) -> RepoResult<FilterOptions> {
        Ok(FilterOptions::from_members(self.members.lock().unwrap().iter()))
    }
}

/// Member store whose every call fails like a dropped connection
pub struct FailingMembers;

#[async_trait]
impl MemberRepository for FailingMembers {
    async fn list(&self, _filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn find_by_id(&self, _id: i32) -> RepoResult<Option<Member>> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn create(&self, _member: &NewMember) -> RepoResult<Member> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn update(&self, _id: i32, _changes: &MemberChanges) -> RepoResult<Option<Member>> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn delete(&self, _id: i32) -> RepoResult<bool> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }

    async fn filter_options(&self) -> RepoResult<FilterOptions> {
        Err(DomainError::DatabaseError("connection reset".to_string()))
    }
}

/// User store keyed by open id
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_open_id(&self, open_id: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.open_id == open_id)
            .cloned())
    }

    async fn upsert(&self, profile: &UserProfile) -> RepoResult<User> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        if let Some(user) = users.iter_mut().find(|u| u.open_id == profile.open_id) {
            if let Some(name) = &profile.name {
                user.name = Some(name.clone());
            }
            if let Some(email) = &profile.email {
                user.email = Some(email.clone());
            }
            if let Some(method) = &profile.login_method {
                user.login_method = Some(method.clone());
            }
            if let Some(role) = profile.role {
                user.role = role;
            }
            user.last_signed_in = now;
            user.updated_at = now;
            return Ok(user.clone());
        }

        let user = User {
            id: users.len() as i32 + 1,
            open_id: profile.open_id.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            login_method: profile.login_method.clone(),
            role: profile.role.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        };
        users.push(user.clone());
        Ok(user)
    }
}

fn jwt() -> Arc<JwtService> {
    Arc::new(JwtService::new(TEST_SECRET, 3600))
}

pub fn member_context(members: Arc<InMemoryMembers>) -> ServiceContext {
    ServiceContext::builder()
        .member_repo(members)
        .user_repo(Arc::new(InMemoryUsers::default()))
        .jwt_service(jwt())
        .build()
        .unwrap()
}

pub fn failing_context() -> ServiceContext {
    ServiceContext::builder()
        .member_repo(Arc::new(FailingMembers))
        .jwt_service(jwt())
        .build()
        .unwrap()
}

pub fn session_context(users: Arc<InMemoryUsers>, owner: Option<String>) -> ServiceContext {
    ServiceContext::builder()
        .member_repo(Arc::new(InMemoryMembers::default()))
        .user_repo(users)
        .jwt_service(jwt())
        .owner_open_id(owner)
        .build()
        .unwrap()
}

pub fn unavailable_context() -> ServiceContext {
    ServiceContext::new(Storage::Unavailable, jwt(), None)
}

fn caller_with_role(role: Role) -> Caller {
    let now = Utc::now();
    Caller::User(User {
        id: 1,
        open_id: format!("{role}-caller"),
        name: None,
        email: None,
        login_method: None,
        role,
        created_at: now,
        updated_at: now,
        last_signed_in: now,
    })
}

pub fn admin() -> Caller {
    caller_with_role(Role::Admin)
}

pub fn regular_user() -> Caller {
    caller_with_role(Role::User)
}

/// A valid create payload with the given roll number
pub fn create_request(roll_number: &str) -> CreateMemberRequest {
    CreateMemberRequest {
        name: format!("Member {roll_number}"),
        email: Some(format!("{}@example.com", roll_number.to_lowercase())),
        phone: None,
        year_of_admission: 2020,
        degree_program: "BS".to_string(),
        roll_number: roll_number.to_string(),
        department: None,
        city: "Lahore".to_string(),
        permanent_address: None,
        photo_url: None,
        bio: None,
        social_links: None,
    }
}
