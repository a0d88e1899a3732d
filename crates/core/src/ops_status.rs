//! Status enums for the operations job lifecycle and processing pipeline.
//!
//! Statuses are stored as TEXT in the database and travel as snake_case
//! strings on the wire. Every literal is a named variant -- repositories
//! and handlers never touch raw status strings.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a property media job, from intake through delivery.
///
/// Progression is linear: `pending -> scheduled -> in_progress -> staged ->
/// awaiting_editing -> in_editing -> ready_for_qc -> in_qc -> delivered`.
/// `cancelled` sits outside the main flow and, like `delivered`, is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpsStatus {
    Pending,
    Scheduled,
    InProgress,
    Staged,
    AwaitingEditing,
    InEditing,
    ReadyForQc,
    InQc,
    Delivered,
    Cancelled,
}

impl OpsStatus {
    /// All known statuses, in lifecycle order (cancelled last).
    pub const ALL: [OpsStatus; 10] = [
        OpsStatus::Pending,
        OpsStatus::Scheduled,
        OpsStatus::InProgress,
        OpsStatus::Staged,
        OpsStatus::AwaitingEditing,
        OpsStatus::InEditing,
        OpsStatus::ReadyForQc,
        OpsStatus::InQc,
        OpsStatus::Delivered,
        OpsStatus::Cancelled,
    ];

    /// The snake_case string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            OpsStatus::Pending => "pending",
            OpsStatus::Scheduled => "scheduled",
            OpsStatus::InProgress => "in_progress",
            OpsStatus::Staged => "staged",
            OpsStatus::AwaitingEditing => "awaiting_editing",
            OpsStatus::InEditing => "in_editing",
            OpsStatus::ReadyForQc => "ready_for_qc",
            OpsStatus::InQc => "in_qc",
            OpsStatus::Delivered => "delivered",
            OpsStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OpsStatus::Delivered | OpsStatus::Cancelled)
    }
}

impl std::fmt::Display for OpsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OpsStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpsStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = OpsStatus::ALL.iter().map(|s| s.as_str()).collect();
                format!("Unknown ops status '{s}'. Known statuses: {}", known.join(", "))
            })
    }
}

impl TryFrom<String> for OpsStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Status of one HDR-bracket-fusion request sent to the external GPU worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Pending,
    Queued,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::Queued => "queued",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProcessingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProcessingStatus::Pending),
            "queued" => Ok(ProcessingStatus::Queued),
            "processing" => Ok(ProcessingStatus::Processing),
            "completed" => Ok(ProcessingStatus::Completed),
            "failed" => Ok(ProcessingStatus::Failed),
            other => Err(format!("Unknown processing status '{other}'")),
        }
    }
}

impl TryFrom<String> for ProcessingStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Pay period settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriodStatus {
    Open,
    Closed,
    Paid,
}

impl PayPeriodStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PayPeriodStatus::Open => "open",
            PayPeriodStatus::Closed => "closed",
            PayPeriodStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PayPeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PayPeriodStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "open" => Ok(PayPeriodStatus::Open),
            "closed" => Ok(PayPeriodStatus::Closed),
            "paid" => Ok(PayPeriodStatus::Paid),
            other => Err(format!("Unknown pay period status '{other}'")),
        }
    }
}

/// Status of a delivered media asset derived from a processing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Pending,
    Processing,
    Ready,
    Failed,
}

impl AssetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Pending => "pending",
            AssetStatus::Processing => "processing",
            AssetStatus::Ready => "ready",
            AssetStatus::Failed => "failed",
        }
    }
}

impl TryFrom<String> for AssetStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(AssetStatus::Pending),
            "processing" => Ok(AssetStatus::Processing),
            "ready" => Ok(AssetStatus::Ready),
            "failed" => Ok(AssetStatus::Failed),
            other => Err(format!("Unknown asset status '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_status_round_trips_through_strings() {
        for status in OpsStatus::ALL {
            assert_eq!(status.as_str().parse::<OpsStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_ops_status_is_rejected_with_known_list() {
        let err = "shipped".parse::<OpsStatus>().unwrap_err();
        assert!(err.contains("Unknown ops status 'shipped'"));
        assert!(err.contains("delivered"));
    }

    #[test]
    fn delivered_and_cancelled_are_terminal() {
        assert!(OpsStatus::Delivered.is_terminal());
        assert!(OpsStatus::Cancelled.is_terminal());
        assert!(!OpsStatus::InQc.is_terminal());
        assert!(!OpsStatus::Pending.is_terminal());
    }

    #[test]
    fn ops_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&OpsStatus::AwaitingEditing).unwrap();
        assert_eq!(json, "\"awaiting_editing\"");
        let back: OpsStatus = serde_json::from_str("\"ready_for_qc\"").unwrap();
        assert_eq!(back, OpsStatus::ReadyForQc);
    }

    #[test]
    fn processing_status_round_trips() {
        for s in ["pending", "queued", "processing", "completed", "failed"] {
            assert_eq!(s.parse::<ProcessingStatus>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn pay_period_status_try_from_string() {
        assert_eq!(
            PayPeriodStatus::try_from("open".to_string()).unwrap(),
            PayPeriodStatus::Open
        );
        assert!(PayPeriodStatus::try_from("reopened".to_string()).is_err());
    }
}
