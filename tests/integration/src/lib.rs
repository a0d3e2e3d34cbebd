//! Integration test utilities for the member directory
//!
//! This crate provides helpers for running end-to-end tests against
//! the HTTP API.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
