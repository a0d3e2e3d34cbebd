//! JWT utilities for session tokens
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.
//! A session token identifies a caller by the external `open_id` assigned by the
//! OAuth provider; the role is looked up from storage on every call.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (external open id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Display name captured at sign-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SessionClaims {
    /// Get the caller's external open id
    pub fn open_id(&self) -> &str {
        &self.sub
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signed session token handed to a client after sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and session lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, session_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expiry,
        }
    }

    /// Session lifetime in seconds
    pub fn session_expiry(&self) -> i64 {
        self.session_expiry
    }

    /// Issue a session token for an external identity
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_session(
        &self,
        open_id: &str,
        name: Option<String>,
    ) -> AppResult<SessionToken> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: open_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.session_expiry)).timestamp(),
            name,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(AppError::internal)?;

        Ok(SessionToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.session_expiry,
        })
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn validate_session(&self, token: &str) -> AppResult<SessionClaims> {
        let validation = Validation::default();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        if token_data.claims.sub.is_empty() {
            return Err(AppError::InvalidToken);
        }

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("session_expiry", &self.session_expiry)
            .finish_non_exhaustive()
    }
}
