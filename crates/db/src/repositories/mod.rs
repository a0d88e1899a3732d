pub mod api_key_repo;
pub mod event_repo;
pub mod job_event_repo;
pub mod job_repo;
pub mod pay_period_repo;
pub mod processing_repo;
pub mod staff_repo;
pub mod time_entry_repo;
pub mod webhook_repo;

pub use api_key_repo::ApiKeyRepo;
pub use event_repo::EventRepo;
pub use job_event_repo::JobEventRepo;
pub use job_repo::JobRepo;
pub use pay_period_repo::{CloseOutcome, PayPeriodRepo};
pub use processing_repo::ProcessingRepo;
pub use staff_repo::StaffRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use webhook_repo::WebhookRepo;
