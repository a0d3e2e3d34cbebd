//! # directory-service
//!
//! Procedure layer for the member directory: authorization policy, payload
//! validation, member and session services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    authorize, Caller, ErrorKind, MemberService, Procedure, ServiceContext, ServiceError,
    ServiceResult, SessionService,
};
