//! HTTP client for the external GPU HDR fusion worker.
//!
//! The worker exposes a small REST API: submit a bracket-fusion job, poll
//! its status, cancel it. This crate wraps that API with [`reqwest`] and
//! typed request/response structs. It never touches the database; callers
//! persist the returned worker reference themselves.

pub mod client;
pub mod types;

pub use client::{HdrClient, HdrClientError, HdrWorkerConfig};
pub use types::{FusionRequest, FusionStatus, FusionSubmitted, WorkerJobState};
