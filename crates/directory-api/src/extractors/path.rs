//! Path parameter extractors

use serde::Deserialize;

use crate::response::ApiError;

/// Path parameters with a member id
///
/// Kept as the raw segment so handlers can authorize before rejecting a
/// malformed id.
#[derive(Debug, Deserialize)]
pub struct MemberIdPath {
    pub id: String,
}

impl MemberIdPath {
    /// Parse the id as a member primary key
    pub fn id(&self) -> Result<i32, ApiError> {
        self.id
            .trim()
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid member id format"))
    }
}
