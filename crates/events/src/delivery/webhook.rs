//! Signed webhook delivery with bounded retry.
//!
//! [`WebhookDispatcher`] subscribes to the event bus and POSTs each event
//! to every active subscription that registered for its type (Zapier catch
//! hooks and similar). Payloads are signed with HMAC-SHA256 using the
//! subscription's secret; the signature travels in `X-Focal-Signature`.
//! Failed attempts are retried after exponential backoff (1 s, 2 s, 4 s)
//! and every outcome is recorded in `webhook_deliveries`.

use std::time::Duration;

use focal_core::api_keys::compute_webhook_hmac;
use focal_db::models::webhook::WebhookSubscription;
use focal_db::repositories::WebhookRepo;
use focal_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::OpsEvent;

/// Backoff before each retry, in seconds: one initial attempt plus one
/// retry per entry (1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// Backoff before retry number `n` (1-based), or `None` once retries are
/// exhausted. There is never a sleep after the final attempt.
fn backoff_before_retry(n: usize) -> Option<Duration> {
    RETRY_DELAYS_SECS.get(n - 1).copied().map(Duration::from_secs)
}

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Signature header carried on every delivery.
const SIGNATURE_HEADER: &str = "X-Focal-Signature";

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// Delivers ops events to registered webhook endpoints.
pub struct WebhookDispatcher {
    pool: DbPool,
    client: reqwest::Client,
}

impl WebhookDispatcher {
    /// Create a dispatcher with a pre-configured HTTP client.
    pub fn new(pool: DbPool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { pool, client }
    }

    /// Run the dispatch loop until the event bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<OpsEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.dispatch(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Webhook dispatcher lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, webhook dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver one event to every matching active subscription.
    async fn dispatch(&self, event: &OpsEvent) {
        let subscriptions =
            match WebhookRepo::list_active_for_event(&self.pool, &event.event_type).await {
                Ok(subs) => subs,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        event_type = %event.event_type,
                        "Failed to load webhook subscriptions"
                    );
                    return;
                }
            };

        for subscription in subscriptions {
            if let Err(e) = self.deliver(&subscription, event).await {
                tracing::warn!(
                    subscription_id = subscription.id,
                    url = %subscription.url,
                    error = %e,
                    "Webhook delivery failed after all retries"
                );
            }
        }
    }

    /// Deliver an event to one subscription, with retry and delivery logging.
    async fn deliver(
        &self,
        subscription: &WebhookSubscription,
        event: &OpsEvent,
    ) -> Result<(), WebhookError> {
        let payload = serde_json::json!({
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
            "source_entity_type": event.source_entity_type,
            "source_entity_id": event.source_entity_id,
        });

        // Best-effort log row; delivery proceeds even if logging fails.
        let delivery_id = match WebhookRepo::insert_delivery(
            &self.pool,
            subscription.id,
            &event.event_type,
            &payload,
        )
        .await
        {
            Ok(delivery) => Some(delivery.id),
            Err(e) => {
                tracing::error!(error = %e, "Failed to open webhook delivery log row");
                None
            }
        };

        let body = payload.to_string();
        let signature = compute_webhook_hmac(&subscription.secret, &body);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_send(&subscription.url, &body, &signature).await {
                Ok(()) => {
                    self.record(delivery_id, true, None).await;
                    return Ok(());
                }
                Err(e) => {
                    self.record(delivery_id, false, Some(&e.to_string())).await;
                    match backoff_before_retry(attempt) {
                        Some(delay) => tokio::time::sleep(delay).await,
                        None => return Err(e),
                    }
                }
            }
        }
    }

    /// Execute a single signed POST request and check the response status.
    async fn try_send(&self, url: &str, body: &str, signature: &str) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body.to_string())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// Record a delivery attempt outcome, if the log row exists.
    async fn record(&self, delivery_id: Option<i64>, delivered: bool, error: Option<&str>) {
        if let Some(id) = delivery_id {
            if let Err(e) = WebhookRepo::record_attempt(&self.pool, id, delivered, error).await {
                tracing::error!(error = %e, delivery_id = id, "Failed to record webhook attempt");
            }
        }
    }
}
