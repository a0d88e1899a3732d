//! Location data proxy layer.
//!
//! Wraps the third-party places provider (dining, events, attractions,
//! neighborhood sub-scores) behind a typed [`reqwest`] client and a shared
//! in-memory TTL cache, so repeated lookups for the same address within the
//! cache window never hit the provider twice.

pub mod cache;
pub mod client;
pub mod types;

pub use cache::ResponseCache;
pub use client::{CachedResponse, PlacesClient, PlacesError, PlacesProviderConfig};
pub use types::PlaceCategory;
