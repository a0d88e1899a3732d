//! Wire types for the HDR worker REST API.

use serde::{Deserialize, Serialize};

/// Body for `POST /fusions`: one bracket-fusion job.
///
/// The bracket images themselves are uploaded to the worker out of band;
/// the worker matches them by `reference`.
#[derive(Debug, Clone, Serialize)]
pub struct FusionRequest {
    /// Caller-side identifier, echoed back in worker callbacks.
    pub reference: String,
    /// Number of exposure brackets in the stack.
    pub bracket_count: i32,
}

/// Response from `POST /fusions` after the worker queues the job.
#[derive(Debug, Clone, Deserialize)]
pub struct FusionSubmitted {
    /// Worker-assigned job identifier, used for status polling.
    pub worker_ref: String,
    /// Position in the worker's queue.
    pub queue_position: i32,
}

/// Lifecycle states reported by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerJobState {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// Response from `GET /fusions/{worker_ref}`. Re-serialized into
/// processing detail responses, so it carries both derives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionStatus {
    pub worker_ref: String,
    pub state: WorkerJobState,
    /// Output URL of the fused image, present once `state` is `completed`.
    pub output_url: Option<String>,
    /// Worker-side failure detail, present once `state` is `failed`.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fusion_status_deserializes_completed() {
        let json = r#"{
            "worker_ref": "wk_8f2a",
            "state": "completed",
            "output_url": "https://cdn.example.com/fused/wk_8f2a.jpg",
            "error": null
        }"#;
        let status: FusionStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.state, WorkerJobState::Completed);
        assert!(status.output_url.is_some());
        assert!(status.error.is_none());
    }

    #[test]
    fn fusion_status_deserializes_failed() {
        let json = r#"{"worker_ref": "wk_1", "state": "failed", "output_url": null, "error": "OOM on fuse pass"}"#;
        let status: FusionStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.state, WorkerJobState::Failed);
        assert_eq!(status.error.as_deref(), Some("OOM on fuse pass"));
    }

    #[test]
    fn fusion_request_serializes_snake_case() {
        let request = FusionRequest {
            reference: "pj-42".to_string(),
            bracket_count: 3,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["reference"], "pj-42");
        assert_eq!(value["bracket_count"], 3);
    }
}
