//! Procedure layer
//!
//! Services authorize the caller, validate input, and translate data-access
//! results into the four caller-visible failure kinds.

pub mod context;
pub mod error;
pub mod member;
pub mod policy;
pub mod session;

#[cfg(test)]
mod testing;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use member::MemberService;
pub use policy::{authorize, Access, Caller, Procedure};
pub use session::SessionService;
