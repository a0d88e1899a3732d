//! Webhook subscription and delivery models.

use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `webhook_subscriptions` table: one registered endpoint
/// (e.g. a Zapier catch hook) interested in a set of event types.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookSubscription {
    pub id: DbId,
    pub url: String,
    #[serde(skip_serializing)]
    pub secret: String,
    pub event_types: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A row from the `webhook_deliveries` table: one delivery attempt log.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebhookDelivery {
    pub id: DbId,
    pub subscription_id: DbId,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub attempts: i16,
    pub delivered: bool,
    pub last_error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
