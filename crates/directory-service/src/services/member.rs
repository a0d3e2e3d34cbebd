//! Member service
//!
//! The `members.*` procedures. Every call authorizes first, then validates the
//! payload, then touches storage. Reads degrade to empty results when storage
//! fails; mutations report an internal error instead.

use directory_core::entities::MemberFilter;
use directory_core::error::DomainError;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::{
    CreateMemberRequest, FilterOptionsResponse, ListMembersQuery, MemberResponse,
    SuccessResponse, UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::{authorize, Caller, Procedure};

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check the policy for a procedure
    ///
    /// Transports call this before decoding a request body so a rejected caller
    /// never learns whether the payload was valid.
    pub fn authorize(&self, caller: &Caller, procedure: Procedure) -> ServiceResult<()> {
        authorize(caller, procedure).inspect_err(|_| {
            warn!(caller = %caller, procedure = %procedure, "Procedure denied");
        })
    }

    /// `members.list`: members matching every supplied predicate, newest first
    #[instrument(skip(self, caller))]
    pub async fn list(
        &self,
        caller: &Caller,
        query: ListMembersQuery,
    ) -> ServiceResult<Vec<MemberResponse>> {
        self.authorize(caller, Procedure::MembersList)?;

        let filter = MemberFilter::from(query);
        match self.ctx.member_repo().list(&filter).await {
            Ok(members) => Ok(members.into_iter().map(MemberResponse::from).collect()),
            Err(e) => {
                warn!(error = %e, "Failed to list members; returning no results");
                Ok(Vec::new())
            }
        }
    }

    /// `members.getById`: the member, or `None` when absent
    #[instrument(skip(self, caller))]
    pub async fn get_by_id(&self, caller: &Caller, id: i32) -> ServiceResult<Option<MemberResponse>> {
        self.authorize(caller, Procedure::MembersGetById)?;

        match self.ctx.member_repo().find_by_id(id).await {
            Ok(member) => Ok(member.map(MemberResponse::from)),
            Err(e) => {
                warn!(error = %e, member_id = id, "Failed to load member; reporting it as absent");
                Ok(None)
            }
        }
    }

    /// `members.getFilterOptions`: distinct years, degrees and cities
    #[instrument(skip(self, caller))]
    pub async fn filter_options(&self, caller: &Caller) -> ServiceResult<FilterOptionsResponse> {
        self.authorize(caller, Procedure::MembersGetFilterOptions)?;

        match self.ctx.member_repo().filter_options().await {
            Ok(options) => Ok(options.into()),
            Err(e) => {
                warn!(error = %e, "Failed to collect filter options; returning none");
                Ok(FilterOptionsResponse::default())
            }
        }
    }

    /// `members.create`: insert a verified member and return the stored row
    #[instrument(skip(self, caller, request))]
    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        self.authorize(caller, Procedure::MembersCreate)?;
        request.validate()?;

        let new_member = request.into_new_member();
        let member = self
            .ctx
            .member_repo()
            .create(&new_member)
            .await
            .map_err(|e| mutation_error(e, "Failed to create member"))?;

        info!(member_id = member.id, roll_number = %member.roll_number, "Member created");

        Ok(member.into())
    }

    /// `members.update`: apply the supplied fields and return the stored row
    #[instrument(skip(self, caller, request))]
    pub async fn update(
        &self,
        caller: &Caller,
        id: i32,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        self.authorize(caller, Procedure::MembersUpdate)?;
        request.validate()?;

        let changes = request.data.into_changes();
        let member = self
            .ctx
            .member_repo()
            .update(id, &changes)
            .await
            .map_err(|e| mutation_error(e, "Failed to update member"))?
            .ok_or(DomainError::MemberNotFound(id))?;

        info!(member_id = id, "Member updated");

        Ok(member.into())
    }

    /// `members.delete`: hard delete; a missing id is `NotFound`
    #[instrument(skip(self, caller))]
    pub async fn delete(&self, caller: &Caller, id: i32) -> ServiceResult<SuccessResponse> {
        self.authorize(caller, Procedure::MembersDelete)?;

        let removed = self
            .ctx
            .member_repo()
            .delete(id)
            .await
            .map_err(|e| mutation_error(e, "Failed to delete member"))?;

        if !removed {
            return Err(DomainError::MemberNotFound(id).into());
        }

        info!(member_id = id, "Member deleted");

        Ok(SuccessResponse::ok())
    }
}

/// Storage faults on a mutation become an internal error carrying `message`;
/// everything else keeps its own classification.
fn mutation_error(err: DomainError, message: &'static str) -> ServiceError {
    if err.is_storage() {
        error!(error = %err, "{message}");
        return ServiceError::internal(message);
    }
    err.into()
}
