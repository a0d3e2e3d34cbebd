//! Member handlers
//!
//! Endpoints for the `members.*` procedures. Admin endpoints run the policy
//! check before the path id or body is looked at.

use axum::{
    extract::{Path, State},
    Json,
};
use directory_service::dto::{
    CreateMemberRequest, FilterOptionsResponse, ListMembersQuery, MemberResponse,
    SuccessResponse, UpdateMemberRequest,
};
use directory_service::{MemberService, Procedure};

use crate::extractors::{CurrentCaller, JsonBody, MemberIdPath, QueryParams};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List members matching the query
///
/// GET /members
pub async fn list_members(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    QueryParams(query): QueryParams<ListMembersQuery>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let members = service.list(&caller, query).await?;
    Ok(Json(members))
}

/// Get a member by id; `null` when absent
///
/// GET /members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(path): Path<MemberIdPath>,
) -> ApiResult<Json<Option<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let member = service.get_by_id(&caller, path.id()?).await?;
    Ok(Json(member))
}

/// Distinct values for the list filters
///
/// GET /members/filter-options
pub async fn get_filter_options(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> ApiResult<Json<FilterOptionsResponse>> {
    let service = MemberService::new(state.service_context());
    let options = service.filter_options(&caller).await?;
    Ok(Json(options))
}

/// Create a member
///
/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    body: JsonBody<CreateMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    service.authorize(&caller, Procedure::MembersCreate)?;

    let member = service.create(&caller, body.into_inner()?).await?;
    Ok(Created(Json(member)))
}

/// Update the supplied fields of a member
///
/// PATCH /members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(path): Path<MemberIdPath>,
    body: JsonBody<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    service.authorize(&caller, Procedure::MembersUpdate)?;

    let member = service
        .update(&caller, path.id()?, body.into_inner()?)
        .await?;
    Ok(Json(member))
}

/// Delete a member
///
/// DELETE /members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(path): Path<MemberIdPath>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = MemberService::new(state.service_context());
    service.authorize(&caller, Procedure::MembersDelete)?;

    let response = service.delete(&caller, path.id()?).await?;
    Ok(Json(response))
}
