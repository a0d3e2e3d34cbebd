//! Data transfer objects for procedure inputs and outputs
//!
//! This module provides:
//! - Request DTOs with validation for procedure inputs
//! - Response DTOs for serializing procedure outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateMemberRequest, ListMembersQuery, MemberChangesRequest, UpdateMemberRequest,
};
pub use responses::{
    FilterOptionsResponse, HealthChecks, HealthResponse, MemberResponse, ReadinessResponse,
    SessionResponse, SuccessResponse, UserResponse,
};
