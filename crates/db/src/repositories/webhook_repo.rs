//! Repository for webhook subscriptions and delivery logs.

use focal_core::types::DbId;
use sqlx::PgPool;

use crate::models::webhook::{WebhookDelivery, WebhookSubscription};

/// Column list for `webhook_subscriptions` queries.
const SUB_COLUMNS: &str = "id, url, secret, event_types, is_active, created_at";

/// Column list for `webhook_deliveries` queries.
const DELIVERY_COLUMNS: &str = "\
    id, subscription_id, event_type, payload, attempts, delivered, \
    last_error, created_at, updated_at";

/// Provides subscription lookups and delivery logging.
pub struct WebhookRepo;

impl WebhookRepo {
    /// List active subscriptions interested in `event_type`.
    pub async fn list_active_for_event(
        pool: &PgPool,
        event_type: &str,
    ) -> Result<Vec<WebhookSubscription>, sqlx::Error> {
        let query = format!(
            "SELECT {SUB_COLUMNS} FROM webhook_subscriptions \
             WHERE is_active AND $1 = ANY(event_types)"
        );
        sqlx::query_as::<_, WebhookSubscription>(&query)
            .bind(event_type)
            .fetch_all(pool)
            .await
    }

    /// Open a delivery log row before the first attempt.
    pub async fn insert_delivery(
        pool: &PgPool,
        subscription_id: DbId,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<WebhookDelivery, sqlx::Error> {
        let query = format!(
            "INSERT INTO webhook_deliveries (subscription_id, event_type, payload) \
             VALUES ($1, $2, $3) \
             RETURNING {DELIVERY_COLUMNS}"
        );
        sqlx::query_as::<_, WebhookDelivery>(&query)
            .bind(subscription_id)
            .bind(event_type)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Record the outcome of one delivery attempt.
    pub async fn record_attempt(
        pool: &PgPool,
        delivery_id: DbId,
        delivered: bool,
        error: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE webhook_deliveries \
             SET attempts = attempts + 1, delivered = $2, last_error = $3, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(delivery_id)
        .bind(delivered)
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }
}
