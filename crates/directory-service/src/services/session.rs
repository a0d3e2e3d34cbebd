//! Session service
//!
//! Turns a bearer token into a [`Caller`] and handles the sign-in side of the
//! OAuth flow. The flow itself lives outside this crate; it hands over the
//! verified profile.

use directory_core::entities::UserProfile;
use tracing::{debug, info, instrument, warn};

use crate::dto::{SessionResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::{authorize, Caller, Procedure};

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the caller behind an optional bearer token
    ///
    /// Never fails: a bad token or an unknown user is an anonymous caller, so
    /// public procedures stay usable with a stale session.
    #[instrument(skip_all)]
    pub async fn resolve_caller(&self, token: Option<&str>) -> Caller {
        let Some(token) = token else {
            return Caller::Anonymous;
        };

        let claims = match self.ctx.jwt_service().validate_session(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Rejected session token; continuing as anonymous");
                return Caller::Anonymous;
            }
        };

        match self.ctx.user_repo().find_by_open_id(claims.open_id()).await {
            Ok(Some(user)) => {
                debug!(open_id = %user.open_id, role = %user.role, "Session resolved");
                Caller::User(user)
            }
            Ok(None) => {
                warn!(open_id = %claims.open_id(), "Session for unknown user; continuing as anonymous");
                Caller::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "Failed to load session user; continuing as anonymous");
                Caller::Anonymous
            }
        }
    }

    /// `auth.me`: the signed-in user, or `None`
    pub fn me(&self, caller: &Caller) -> ServiceResult<Option<UserResponse>> {
        authorize(caller, Procedure::AuthMe)?;
        Ok(caller.user().map(UserResponse::from))
    }

    /// Record a completed OAuth sign-in and issue a session token
    ///
    /// The configured owner is always stored as admin.
    #[instrument(skip(self, profile), fields(open_id = %profile.open_id))]
    pub async fn sign_in(&self, profile: UserProfile) -> ServiceResult<SessionResponse> {
        if profile.open_id.trim().is_empty() {
            return Err(ServiceError::validation("openId is required"));
        }

        let profile = profile.with_owner(self.ctx.owner_open_id());
        let user = self.ctx.user_repo().upsert(&profile).await.map_err(|e| {
            if e.is_storage() {
                warn!(error = %e, "Failed to record sign-in");
                ServiceError::internal("Failed to sign in")
            } else {
                e.into()
            }
        })?;

        let session = self
            .ctx
            .jwt_service()
            .issue_session(&user.open_id, user.name.clone())?;

        info!(role = %user.role, "User signed in");

        Ok(SessionResponse {
            token: session.token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            user: user.into(),
        })
    }
}
