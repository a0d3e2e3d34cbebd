//! Route handlers
//!
//! All HTTP request handlers organized by procedure namespace.

pub mod auth;
pub mod health;
pub mod members;
