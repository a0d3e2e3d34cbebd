//! Service context - dependency container for services
//!
//! Holds the storage handle, repositories, and session signing needed by services.

use std::sync::Arc;

use directory_common::auth::JwtService;
use directory_core::traits::{MemberRepository, UserRepository};
use directory_db::Storage;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - The injected storage handle (possibly `Storage::Unavailable`)
/// - Member and user repositories derived from it
/// - JWT service for session tokens
/// - The configured owner identity
#[derive(Clone)]
pub struct ServiceContext {
    storage: Storage,

    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Sessions
    jwt_service: Arc<JwtService>,
    owner_open_id: Option<String>,
}

impl ServiceContext {
    /// Create a context whose repositories come from `storage`
    pub fn new(storage: Storage, jwt_service: Arc<JwtService>, owner_open_id: Option<String>) -> Self {
        Self {
            member_repo: storage.member_repository(),
            user_repo: storage.user_repository(),
            storage,
            jwt_service,
            owner_open_id,
        }
    }

    /// Start a builder, for swapping in custom repositories
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Storage ===

    /// Get the storage handle
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Sessions ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// External identity that is always admin
    pub fn owner_open_id(&self) -> Option<&str> {
        self.owner_open_id.as_deref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("storage", &self.storage)
            .field("repositories", &"...")
            .field("owner_open_id", &self.owner_open_id)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Repositories that are not set explicitly are taken from the storage handle,
/// which defaults to `Storage::Unavailable`.
#[derive(Default)]
pub struct ServiceContextBuilder {
    storage: Option<Storage>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    owner_open_id: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn owner_open_id(mut self, open_id: Option<String>) -> Self {
        self.owner_open_id = open_id;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if the JWT service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let storage = self.storage.unwrap_or(Storage::Unavailable);
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::internal("jwt_service is required"))?;

        Ok(ServiceContext {
            member_repo: self
                .member_repo
                .unwrap_or_else(|| storage.member_repository()),
            user_repo: self.user_repo.unwrap_or_else(|| storage.user_repository()),
            storage,
            jwt_service,
            owner_open_id: self.owner_open_id,
        })
    }
}
