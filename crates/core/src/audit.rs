//! Event type names and audit action constants.
//!
//! Every audit-worthy mutation publishes an event with one of these names.
//! Keeping them in `core` means handlers, the persistence task, and the
//! webhook dispatcher all agree on the vocabulary.

/// Known event type names published on the ops event bus.
pub mod event_types {
    pub const JOB_STATUS_CHANGED: &str = "job.status_changed";
    pub const JOB_DELIVERED: &str = "job.delivered";
    pub const ASSIGNMENT_CREATED: &str = "assignment.created";
    pub const PAY_PERIOD_CLOSED: &str = "pay_period.closed";
    pub const PROCESSING_RETRIED: &str = "processing.retried";
    pub const API_KEY_CREATED: &str = "api_key.created";
    pub const API_KEY_REVOKED: &str = "api_key.revoked";
    pub const STAFF_LOGIN: &str = "staff.login";
    pub const STAFF_DEACTIVATED: &str = "staff.deactivated";
}

/// Log categories used to group events for retention and display.
pub mod categories {
    pub const AUTHENTICATION: &str = "authentication";
    pub const OPERATIONS: &str = "operations";
    pub const PAYROLL: &str = "payroll";
    pub const INTEGRATIONS: &str = "integrations";
}

/// Map an event type to its log category.
///
/// Unknown event types default to `"operations"`.
pub fn event_type_to_category(event_type: &str) -> &'static str {
    match event_type {
        event_types::STAFF_LOGIN | event_types::STAFF_DEACTIVATED => categories::AUTHENTICATION,
        event_types::PAY_PERIOD_CLOSED => categories::PAYROLL,
        event_types::API_KEY_CREATED | event_types::API_KEY_REVOKED => categories::INTEGRATIONS,
        _ => categories::OPERATIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_maps_to_authentication() {
        assert_eq!(
            event_type_to_category(event_types::STAFF_LOGIN),
            categories::AUTHENTICATION
        );
    }

    #[test]
    fn pay_period_close_maps_to_payroll() {
        assert_eq!(
            event_type_to_category(event_types::PAY_PERIOD_CLOSED),
            categories::PAYROLL
        );
    }

    #[test]
    fn api_key_events_map_to_integrations() {
        assert_eq!(
            event_type_to_category(event_types::API_KEY_CREATED),
            categories::INTEGRATIONS
        );
        assert_eq!(
            event_type_to_category(event_types::API_KEY_REVOKED),
            categories::INTEGRATIONS
        );
    }

    #[test]
    fn status_changes_and_unknowns_map_to_operations() {
        assert_eq!(
            event_type_to_category(event_types::JOB_STATUS_CHANGED),
            categories::OPERATIONS
        );
        assert_eq!(event_type_to_category("something.else"), categories::OPERATIONS);
    }
}
