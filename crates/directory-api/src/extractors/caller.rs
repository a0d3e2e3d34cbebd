//! Caller extractor
//!
//! Resolves the optional `Authorization: Bearer` session token into a
//! [`Caller`]. Resolution never rejects the request: a missing, malformed or
//! stale token yields an anonymous caller and the procedure policy decides.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use directory_service::{Caller, SessionService};

use crate::state::AppState;

/// The caller behind the current request
#[derive(Debug, Clone)]
pub struct CurrentCaller(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentCaller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok();

        let app_state = AppState::from_ref(state);
        let service = SessionService::new(app_state.service_context());
        let token = bearer.as_ref().map(|TypedHeader(Authorization(b))| b.token());

        Ok(CurrentCaller(service.resolve_caller(token).await))
    }
}
