//! Session token utilities

mod jwt;

pub use jwt::{JwtService, SessionClaims, SessionToken};
