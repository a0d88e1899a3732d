//! Shared response envelope types for API handlers.
//!
//! Admin responses use a `{ "data": ... }` envelope; the public location
//! proxies use `{ "success", "data", "meta" }` with cache and timing
//! metadata. Batch operations report per-item outcomes plus a summary.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope for admin routes.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Metadata attached to every public proxy response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyMeta {
    /// The request id assigned by the request-id middleware.
    pub request_id: String,
    /// Whether the payload was served from the shared response cache.
    pub cached: bool,
    /// Handler-measured elapsed time in milliseconds.
    pub response_time_ms: u64,
}

/// `{ "success", "data", "meta" }` envelope for the public location proxies.
#[derive(Debug, Serialize)]
pub struct ProxyResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub meta: ProxyMeta,
}

/// Outcome of one item in a batch operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult<T: Serialize> {
    /// The id the item targeted.
    pub id: i64,
    pub success: bool,
    /// Human-readable rejection, present when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The updated entity, present when `success` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

/// Summary counts for a batch operation.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Count successes and failures from a result list.
    pub fn from_results<T: Serialize>(results: &[BatchItemResult<T>]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

/// Response body for batch endpoints: per-item results plus summary.
#[derive(Debug, Serialize)]
pub struct BatchResponse<T: Serialize> {
    pub results: Vec<BatchItemResult<T>>,
    pub summary: BatchSummary,
}

impl<T: Serialize> BatchResponse<T> {
    pub fn new(results: Vec<BatchItemResult<T>>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self { results, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_match_results() {
        let results = vec![
            BatchItemResult::<i32> {
                id: 1,
                success: true,
                error: None,
                result: Some(10),
            },
            BatchItemResult::<i32> {
                id: 2,
                success: false,
                error: Some("nope".into()),
                result: None,
            },
            BatchItemResult::<i32> {
                id: 3,
                success: true,
                error: None,
                result: Some(30),
            },
        ];
        let response = BatchResponse::new(results);
        assert_eq!(response.summary.total, 3);
        assert_eq!(response.summary.succeeded, 2);
        assert_eq!(response.summary.failed, 1);
    }

    #[test]
    fn failed_item_omits_result_field() {
        let item = BatchItemResult::<i32> {
            id: 7,
            success: false,
            error: Some("Staff member Ana is not active".into()),
            result: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
        assert_eq!(value["error"], "Staff member Ana is not active");
    }
}
