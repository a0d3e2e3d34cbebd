//! Deferred JSON body extractor
//!
//! Admin procedures must reject an unauthorized caller before they look at the
//! payload, so decoding failures are held instead of rejecting the request.
//! Handlers call [`JsonBody::into_inner`] after the policy check.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// A JSON body whose decoding error is reported on demand
#[derive(Debug)]
pub struct JsonBody<T>(Result<T, ApiError>);

impl<T> JsonBody<T> {
    /// The decoded body, or the error the decoding produced
    ///
    /// # Errors
    /// Returns a validation-kind error when the body was not valid JSON for `T`
    pub fn into_inner(self) -> Result<T, ApiError> {
        self.0
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let decoded = Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| value)
            .map_err(|e| match e {
                JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::BytesRejection(e) => ApiError::invalid_body(e.body_text()),
                _ => ApiError::invalid_body("Invalid JSON body"),
            });

        Ok(JsonBody(decoded))
    }
}
