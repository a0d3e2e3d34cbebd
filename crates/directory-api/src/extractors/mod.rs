//! Axum extractors for request handling
//!
//! Custom extractors for the caller, path ids, query strings and JSON bodies.

mod body;
mod caller;
mod path;
mod query;

pub use body::JsonBody;
pub use caller::CurrentCaller;
pub use path::MemberIdPath;
pub use query::QueryParams;
