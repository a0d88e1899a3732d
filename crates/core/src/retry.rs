//! Retry eligibility gate for failed HDR processing jobs.
//!
//! The gate is evaluated in a fixed order so callers always get the most
//! specific denial: wrong status, attempts exhausted, poison pill, then
//! cooldown. The actual state mutation uses a conditional UPDATE keyed on
//! the expected `retry_count`, so two concurrent retries cannot both win.

use crate::ops_status::ProcessingStatus;
use crate::types::Timestamp;

/// Default maximum retry attempts per processing job.
pub const DEFAULT_MAX_RETRIES: i32 = 3;

/// Minimum wait between successive retry attempts, in milliseconds.
pub const RETRY_COOLDOWN_MS: i64 = 30_000;

/// The retry-relevant fields of a processing job row.
#[derive(Debug, Clone)]
pub struct RetryState {
    pub status: ProcessingStatus,
    pub retry_count: i32,
    pub max_retries: i32,
    pub can_retry: bool,
    pub last_retry_at: Option<Timestamp>,
}

/// Why a retry request was denied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetryDenied {
    #[error("Only failed jobs can be retried (current status: {0})")]
    NotFailed(ProcessingStatus),

    #[error("Maximum retry attempts ({max_retries}) exceeded")]
    Exhausted { max_retries: i32 },

    #[error("Job has been marked as not retryable")]
    Poisoned,

    #[error("Retry cooldown active, wait {wait_seconds}s")]
    Cooldown { wait_seconds: i64 },
}

/// Check whether a retry is permitted right now.
pub fn check_retry(state: &RetryState, now: Timestamp) -> Result<(), RetryDenied> {
    if state.status != ProcessingStatus::Failed {
        return Err(RetryDenied::NotFailed(state.status));
    }

    if state.retry_count >= state.max_retries {
        return Err(RetryDenied::Exhausted {
            max_retries: state.max_retries,
        });
    }

    if !state.can_retry {
        return Err(RetryDenied::Poisoned);
    }

    if let Some(last) = state.last_retry_at {
        let elapsed_ms = (now - last).num_milliseconds();
        if elapsed_ms < RETRY_COOLDOWN_MS {
            return Err(RetryDenied::Cooldown {
                wait_seconds: wait_seconds(elapsed_ms),
            });
        }
    }

    Ok(())
}

/// Remaining cooldown, rounded up to the nearest whole second.
fn wait_seconds(elapsed_ms: i64) -> i64 {
    let remaining_ms = RETRY_COOLDOWN_MS - elapsed_ms;
    (remaining_ms + 999) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn failed_state() -> RetryState {
        RetryState {
            status: ProcessingStatus::Failed,
            retry_count: 0,
            max_retries: DEFAULT_MAX_RETRIES,
            can_retry: true,
            last_retry_at: None,
        }
    }

    #[test]
    fn fresh_failed_job_is_eligible() {
        assert_eq!(check_retry(&failed_state(), Utc::now()), Ok(()));
    }

    #[test]
    fn non_failed_statuses_are_rejected() {
        for status in [
            ProcessingStatus::Pending,
            ProcessingStatus::Queued,
            ProcessingStatus::Processing,
            ProcessingStatus::Completed,
        ] {
            let state = RetryState {
                status,
                ..failed_state()
            };
            assert_eq!(
                check_retry(&state, Utc::now()),
                Err(RetryDenied::NotFailed(status))
            );
        }
    }

    #[test]
    fn exhausted_attempts_rejected_regardless_of_cooldown() {
        // last_retry_at well in the past: cooldown alone would allow it.
        let state = RetryState {
            retry_count: 3,
            last_retry_at: Some(Utc::now() - Duration::hours(1)),
            ..failed_state()
        };
        let err = check_retry(&state, Utc::now()).unwrap_err();
        assert_eq!(err, RetryDenied::Exhausted { max_retries: 3 });
        assert_eq!(err.to_string(), "Maximum retry attempts (3) exceeded");
    }

    #[test]
    fn poison_pill_blocks_retry() {
        let state = RetryState {
            can_retry: false,
            ..failed_state()
        };
        assert_eq!(check_retry(&state, Utc::now()), Err(RetryDenied::Poisoned));
    }

    #[test]
    fn cooldown_returns_remaining_wait_rounded_up() {
        let now = Utc::now();
        // Retried 12.4 seconds ago: 17600ms remain -> ceil to 18s.
        let state = RetryState {
            last_retry_at: Some(now - Duration::milliseconds(12_400)),
            ..failed_state()
        };
        assert_eq!(
            check_retry(&state, now),
            Err(RetryDenied::Cooldown { wait_seconds: 18 })
        );
    }

    #[test]
    fn exact_cooldown_boundary_is_eligible() {
        let now = Utc::now();
        let state = RetryState {
            last_retry_at: Some(now - Duration::milliseconds(RETRY_COOLDOWN_MS)),
            ..failed_state()
        };
        assert_eq!(check_retry(&state, now), Ok(()));
    }

    #[test]
    fn one_millisecond_short_waits_one_second() {
        let now = Utc::now();
        let state = RetryState {
            last_retry_at: Some(now - Duration::milliseconds(RETRY_COOLDOWN_MS - 1)),
            ..failed_state()
        };
        assert_eq!(
            check_retry(&state, now),
            Err(RetryDenied::Cooldown { wait_seconds: 1 })
        );
    }

    #[test]
    fn gate_order_reports_status_before_exhaustion() {
        let state = RetryState {
            status: ProcessingStatus::Completed,
            retry_count: 5,
            can_retry: false,
            ..failed_state()
        };
        assert_eq!(
            check_retry(&state, Utc::now()),
            Err(RetryDenied::NotFailed(ProcessingStatus::Completed))
        );
    }
}
