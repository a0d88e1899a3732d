//! Domain logic for the Focal media production operations platform.
//!
//! This crate has zero internal dependencies so it can be used by the
//! API/repository layer, the event pipeline, and any future worker or
//! CLI tooling.

pub mod api_keys;
pub mod assignment;
pub mod audit;
pub mod error;
pub mod hashing;
pub mod ops_status;
pub mod payroll;
pub mod retry;
pub mod scoring;
pub mod types;
