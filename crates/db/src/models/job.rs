//! Job (listing ops record) models and DTOs.

use focal_core::assignment::AssignmentRole;
use focal_core::ops_status::OpsStatus;
use focal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `jobs` table: one property shoot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub address: String,
    #[sqlx(try_from = "String")]
    pub ops_status: OpsStatus,
    pub photographer_id: Option<DbId>,
    pub editor_id: Option<DbId>,
    pub is_rush: bool,
    pub scheduled_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /admin/ops/bulk-status`.
///
/// `new_status` arrives as a raw string so the handler can reject unknown
/// values with the enumerated list of known statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest {
    pub job_ids: Vec<DbId>,
    pub new_status: String,
}

/// Query parameters for `GET /admin/ops/jobs`.
#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    /// Filter by ops status (snake_case string).
    pub status: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// One assignment request: single body or an element of the batch form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignment {
    pub listing_id: DbId,
    pub staff_id: DbId,
    pub role: AssignmentRole,
    /// Shoot time written onto the job for photographer assignments.
    pub scheduled_at: Option<Timestamp>,
}

/// `POST /admin/assignments` accepts either a single assignment object or
/// `{ "assignments": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AssignmentRequest {
    Batch { assignments: Vec<CreateAssignment> },
    Single(CreateAssignment),
}

/// Query parameters for `GET /admin/assignments/candidates`.
#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub role: AssignmentRole,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // The untagged order matters: the batch form must be tried first, or a
    // `{"assignments": [...]}` body would never match.
    #[test]
    fn assignment_request_parses_batch_form() {
        let raw = r#"{"assignments":[{"listingId":1,"staffId":2,"role":"photographer"}]}"#;
        let parsed: AssignmentRequest = serde_json::from_str(raw).unwrap();
        assert_matches!(
            parsed,
            AssignmentRequest::Batch { assignments } if assignments.len() == 1
        );
    }

    #[test]
    fn assignment_request_parses_single_form() {
        let raw = r#"{"listingId":5,"staffId":9,"role":"editor"}"#;
        let parsed: AssignmentRequest = serde_json::from_str(raw).unwrap();
        assert_matches!(
            parsed,
            AssignmentRequest::Single(a) if a.listing_id == 5 && a.staff_id == 9
        );
    }

    #[test]
    fn bulk_status_request_uses_camel_case() {
        let raw = r#"{"jobIds":[1,2,3],"newStatus":"editing"}"#;
        let parsed: BulkStatusRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.job_ids, vec![1, 2, 3]);
        assert_eq!(parsed.new_status, "editing");
    }
}
