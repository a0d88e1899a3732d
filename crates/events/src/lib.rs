//! Event pipeline: in-process bus, durable persistence, outbound delivery.
//!
//! Handlers publish [`OpsEvent`]s and return immediately; persistence and
//! delivery run as background tasks, so their failure can never fail the
//! primary mutation.

pub mod bus;
pub mod delivery;
pub mod persistence;

pub use bus::{EventBus, OpsEvent};
pub use delivery::email::{EmailConfig, EmailNotifier};
pub use delivery::webhook::WebhookDispatcher;
pub use persistence::EventPersistence;
