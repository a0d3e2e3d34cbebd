//! Session handlers
//!
//! The OAuth sign-in flow runs outside this server; it only reads sessions.

use axum::{extract::State, Json};
use directory_service::dto::UserResponse;
use directory_service::SessionService;

use crate::extractors::CurrentCaller;
use crate::response::ApiResult;
use crate::state::AppState;

/// The signed-in user, or `null`
///
/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> ApiResult<Json<Option<UserResponse>>> {
    let service = SessionService::new(state.service_context());
    Ok(Json(service.me(&caller)?))
}
