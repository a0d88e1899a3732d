//! Repository for the `staff` table.

use focal_core::assignment::{AssignmentRole, Candidate};
use focal_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff::Staff;

/// Column list for `staff` queries.
const COLUMNS: &str = "\
    id, name, email, password_hash, role, is_active, payout_type, \
    hourly_rate_cents, created_at, updated_at";

/// Provides read and deactivation operations for the staff roster.
pub struct StaffRepo;

impl StaffRepo {
    /// Find a staff member by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE id = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a staff member by email (login lookup).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE email = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List the whole roster, active first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff ORDER BY is_active DESC, name ASC");
        sqlx::query_as::<_, Staff>(&query).fetch_all(pool).await
    }

    /// Deactivate a staff member (never hard-deleted).
    ///
    /// Returns the updated row, or `None` if no such staff member exists.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!(
            "UPDATE staff SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active staff eligible for `role`, with their current count of
    /// open (non-terminal) assignments. Unranked; the caller sorts via
    /// [`focal_core::assignment::rank_candidates`].
    pub async fn list_candidates(
        pool: &PgPool,
        role: AssignmentRole,
    ) -> Result<Vec<Candidate>, sqlx::Error> {
        // The FK column is picked from a static match, never from input.
        let fk_column = match role {
            AssignmentRole::Photographer => "photographer_id",
            AssignmentRole::Editor => "editor_id",
        };

        let query = format!(
            "SELECT s.id AS staff_id, s.name, COUNT(j.id) AS open_assignments \
             FROM staff s \
             LEFT JOIN jobs j ON j.{fk_column} = s.id \
                 AND j.ops_status NOT IN ('delivered', 'cancelled') \
             WHERE s.role = $1 AND s.is_active \
             GROUP BY s.id, s.name"
        );

        let rows = sqlx::query_as::<_, CandidateRow>(&query)
            .bind(role.required_staff_role().as_str())
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Candidate {
                staff_id: r.staff_id,
                name: r.name,
                open_assignments: r.open_assignments,
            })
            .collect())
    }
}

/// Projection row for the candidate/workload query.
#[derive(sqlx::FromRow)]
struct CandidateRow {
    staff_id: DbId,
    name: String,
    open_assignments: i64,
}
