//! Assignment candidate validation and workload ranking.
//!
//! Ranking is a greedy load-balancing heuristic: candidates are sorted
//! ascending by their count of open (non-terminal) assignments, so the
//! least-busy staff member sorts first. Ties break by staff id for
//! deterministic output. No geographic or skill weighting is applied.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Staff member role on the operations roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Photographer,
    Editor,
    Qc,
    Admin,
}

impl StaffRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::Photographer => "photographer",
            StaffRole::Editor => "editor",
            StaffRole::Qc => "qc",
            StaffRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for StaffRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "photographer" => Ok(StaffRole::Photographer),
            "editor" => Ok(StaffRole::Editor),
            "qc" => Ok(StaffRole::Qc),
            "admin" => Ok(StaffRole::Admin),
            other => Err(format!("Unknown staff role '{other}'")),
        }
    }
}

/// The two roles a job assignment can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentRole {
    Photographer,
    Editor,
}

impl AssignmentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentRole::Photographer => "photographer",
            AssignmentRole::Editor => "editor",
        }
    }

    /// The staff role required to accept this assignment.
    pub fn required_staff_role(self) -> StaffRole {
        match self {
            AssignmentRole::Photographer => StaffRole::Photographer,
            AssignmentRole::Editor => StaffRole::Editor,
        }
    }
}

impl std::fmt::Display for AssignmentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff member considered for assignment, with current workload.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub staff_id: DbId,
    pub name: String,
    pub open_assignments: i64,
}

/// Sort candidates least-busy first (ties broken by staff id).
pub fn rank_candidates(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by_key(|c| (c.open_assignments, c.staff_id));
    candidates
}

/// Validate that a staff member can accept an assignment for `role`.
///
/// Returns the human-readable rejection used in per-item batch results.
pub fn validate_candidate(
    name: &str,
    is_active: bool,
    staff_role: StaffRole,
    role: AssignmentRole,
) -> Result<(), String> {
    if !is_active {
        return Err(format!("Staff member {name} is not active"));
    }
    if staff_role != role.required_staff_role() {
        return Err(format!("{name} is not a {role}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(staff_id: DbId, open: i64) -> Candidate {
        Candidate {
            staff_id,
            name: format!("staff-{staff_id}"),
            open_assignments: open,
        }
    }

    #[test]
    fn least_busy_candidate_sorts_first() {
        let ranked = rank_candidates(vec![candidate(1, 5), candidate(2, 0), candidate(3, 2)]);
        let ids: Vec<DbId> = ranked.iter().map(|c| c.staff_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn workload_ties_break_by_staff_id() {
        let ranked = rank_candidates(vec![candidate(9, 1), candidate(4, 1), candidate(6, 1)]);
        let ids: Vec<DbId> = ranked.iter().map(|c| c.staff_id).collect();
        assert_eq!(ids, vec![4, 6, 9]);
    }

    #[test]
    fn inactive_staff_is_rejected() {
        let err = validate_candidate("Ana Reyes", false, StaffRole::Photographer,
            AssignmentRole::Photographer)
        .unwrap_err();
        assert_eq!(err, "Staff member Ana Reyes is not active");
    }

    #[test]
    fn role_mismatch_is_rejected_with_role_name() {
        let err = validate_candidate("Ben Ito", true, StaffRole::Editor,
            AssignmentRole::Photographer)
        .unwrap_err();
        assert_eq!(err, "Ben Ito is not a photographer");

        let err = validate_candidate("Ben Ito", true, StaffRole::Qc, AssignmentRole::Editor)
            .unwrap_err();
        assert_eq!(err, "Ben Ito is not a editor");
    }

    #[test]
    fn matching_active_staff_is_accepted() {
        assert!(validate_candidate("Cay Lund", true, StaffRole::Editor,
            AssignmentRole::Editor)
        .is_ok());
    }

    #[test]
    fn inactive_check_runs_before_role_check() {
        let err = validate_candidate("Dia Ode", false, StaffRole::Qc,
            AssignmentRole::Photographer)
        .unwrap_err();
        assert!(err.contains("not active"));
    }
}
