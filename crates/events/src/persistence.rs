//! Durable event persistence service.
//!
//! [`EventPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and writes every received [`OpsEvent`] to the
//! `ops_events` table. It runs as a long-lived background task and shuts
//! down gracefully when the bus sender is dropped.

use focal_core::audit::event_type_to_category;
use focal_core::types::DbId;
use focal_db::repositories::EventRepo;
use focal_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::OpsEvent;

/// Background service that persists ops events to the database.
pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop.
    ///
    /// Subscribes to the event bus via the provided `receiver` and persists
    /// every event it receives. The loop exits when the channel is closed
    /// (i.e. the [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<OpsEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to persist event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to the `ops_events` table.
    async fn persist(pool: &DbPool, event: &OpsEvent) -> Result<DbId, sqlx::Error> {
        EventRepo::insert(
            pool,
            &event.event_type,
            event_type_to_category(&event.event_type),
            event.source_entity_type.as_deref(),
            event.source_entity_id,
            event.actor_staff_id,
            &event.payload,
        )
        .await
    }
}
