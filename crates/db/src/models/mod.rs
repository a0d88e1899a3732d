pub mod api_key;
pub mod job;
pub mod job_event;
pub mod pay_period;
pub mod processing;
pub mod staff;
pub mod webhook;
