//! Request extractors for authentication and authorization.

pub mod api_key;
pub mod auth;
