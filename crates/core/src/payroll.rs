//! Pay period settlement arithmetic.
//!
//! Aggregation is pure: repositories fetch the time entries in a period's
//! date range and hand them here, so the totals can be unit-tested without
//! a database. Once a period is closed the stored totals are frozen and
//! must never be recomputed on read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// How a staff member is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutType {
    #[serde(rename = "hourly")]
    Hourly,
    #[serde(rename = "1099")]
    Contractor1099,
    #[serde(rename = "w2")]
    W2,
}

impl PayoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            PayoutType::Hourly => "hourly",
            PayoutType::Contractor1099 => "1099",
            PayoutType::W2 => "w2",
        }
    }
}

impl TryFrom<String> for PayoutType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "hourly" => Ok(PayoutType::Hourly),
            "1099" => Ok(PayoutType::Contractor1099),
            "w2" => Ok(PayoutType::W2),
            other => Err(format!("Unknown payout type '{other}'")),
        }
    }
}

/// One finalized time entry, as fetched for settlement.
#[derive(Debug, Clone)]
pub struct SettlementEntry {
    pub staff_id: DbId,
    pub duration_minutes: i32,
    pub total_pay_cents: i64,
}

/// Grand totals for a pay period, computed at close time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub total_minutes: i64,
    pub total_hours: f64,
    pub total_pay_cents: i64,
}

/// Per-staff totals returned for inspection before close. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffBreakdown {
    pub staff_id: DbId,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub total_pay_cents: i64,
}

/// Convert minutes to hours, rounded to two decimal places.
fn minutes_to_hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

/// Sum all entries into a single grand total.
pub fn settle(entries: &[SettlementEntry]) -> PeriodTotals {
    let total_minutes: i64 = entries.iter().map(|e| i64::from(e.duration_minutes)).sum();
    let total_pay_cents: i64 = entries.iter().map(|e| e.total_pay_cents).sum();

    PeriodTotals {
        total_minutes,
        total_hours: minutes_to_hours(total_minutes),
        total_pay_cents,
    }
}

/// Group the same entries by staff member, ordered by staff id.
pub fn per_staff_breakdown(entries: &[SettlementEntry]) -> Vec<StaffBreakdown> {
    let mut grouped: BTreeMap<DbId, (i64, i64)> = BTreeMap::new();
    for entry in entries {
        let slot = grouped.entry(entry.staff_id).or_insert((0, 0));
        slot.0 += i64::from(entry.duration_minutes);
        slot.1 += entry.total_pay_cents;
    }

    grouped
        .into_iter()
        .map(|(staff_id, (minutes, cents))| StaffBreakdown {
            staff_id,
            total_minutes: minutes,
            total_hours: minutes_to_hours(minutes),
            total_pay_cents: cents,
        })
        .collect()
}
