//! HTTP request handlers, one module per resource.

/// Maximum number of ids accepted by a bulk request body.
pub(crate) const MAX_BATCH_IDS: usize = 100;

pub mod api_keys;
pub mod assignments;
pub mod auth;
pub mod jobs;
pub mod location;
pub mod processing;
pub mod staff;
pub mod time_periods;
