//! Repository for the durable `ops_events` table.

use focal_core::types::DbId;
use sqlx::PgPool;

/// Provides append operations for persisted ops events. The table is an
/// append-only log; reads happen out of band (SQL, reporting tools).
pub struct EventRepo;

impl EventRepo {
    /// Persist one event.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        category: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_staff_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO ops_events \
                 (event_type, category, source_entity_type, source_entity_id, \
                  actor_staff_id, payload) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(event_type)
        .bind(category)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(actor_staff_id)
        .bind(payload)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
